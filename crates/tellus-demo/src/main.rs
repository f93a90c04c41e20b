//! Demo binary that orbits a camera around a procedurally displaced planet
//! and regenerates the adaptive terrain mesh in the background each frame.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Run with `cargo run -p tellus-demo` for a 120-frame orbit.
//! Run with `cargo run -p tellus-demo -- --frames 600 --radius 1737.4` for a
//! longer orbit around a smaller planet.

use std::time::{Duration, Instant};

use clap::Parser;
use tellus_config::{CliArgs, Config, default_config_dir};
use tellus_lod::FrustumLens;
use tellus_planet::{GeneratorOptions, PassReport, PlanetConfig, PlanetGenerator, ViewState};
use tellus_terrain::HeightfieldParams;
use tracing::{info, warn};

/// Orbit elevation out of the equator plane, in radians.
const ORBIT_TILT: f64 = 0.35;

fn planet_config(config: &Config) -> PlanetConfig {
    PlanetConfig {
        radius: config.planet.radius,
        min_altitude: config.planet.min_altitude,
        max_altitude: config.planet.max_altitude,
        max_level: config.planet.max_subdivision,
        heightfield: HeightfieldParams {
            seed: config.planet.seed,
            octaves: config.planet.octaves,
            lacunarity: config.planet.lacunarity,
            persistence: config.planet.persistence,
            base_frequency: config.planet.base_frequency,
            amplitude: config.planet.amplitude,
        },
        smooth_shading: config.planet.smooth_shading,
        frustum_culling: config.generation.frustum_culling,
        backface_culling: config.generation.backface_culling,
    }
}

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load config: {err}");
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    tellus_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config.logging),
    );

    info!(
        radius = config.planet.radius,
        seed = config.planet.seed,
        max_subdivision = config.planet.max_subdivision,
        frames = args.frames,
        "starting orbit demo"
    );

    let lens = FrustumLens {
        fov_y: config.camera.fov_y_degrees.to_radians(),
        aspect: config.camera.aspect(),
        near: config.camera.near,
        far: config.camera.far,
    };
    let options = GeneratorOptions {
        target_edge_px: config.generation.target_edge_px,
        collider_resolution: config.generation.collider_grid_resolution,
    };
    let mut generator = PlanetGenerator::with_options(planet_config(&config), options);

    let orbit_step = config.camera.orbit_step_degrees.to_radians();
    let mut passes = 0u32;
    let mut dropped = 0u32;
    let mut failed = 0u32;
    let start = Instant::now();

    for frame in 0..args.frames {
        let orbit_angle = frame as f64 * orbit_step;
        let view = ViewState::orbiting(
            config.planet.radius,
            config.camera.orbit_altitude,
            orbit_angle,
            ORBIT_TILT,
            lens,
            config.camera.viewport_width,
        );

        if !generator.request_regeneration(&view) {
            dropped += 1;
        }

        match generator.poll() {
            Some(Ok(stats)) => {
                passes += 1;
                info!(
                    frame,
                    vertices = stats.vertices,
                    triangles = stats.triangles,
                    collider_chunks = stats.collider_chunks,
                    elapsed_ms = stats.elapsed.as_millis() as u64,
                    "swapped in terrain pass"
                );
            }
            Some(Err(err)) => {
                failed += 1;
                warn!(frame, error = %err, "terrain pass failed; keeping previous mesh");
            }
            None => {}
        }

        std::thread::sleep(Duration::from_millis(16));
    }

    // Drain the pass still in flight when the frame loop ends.
    match drain_final_pass(&mut generator, Duration::from_secs(30)) {
        Some(Ok(_)) => passes += 1,
        Some(Err(_)) => failed += 1,
        None => {
            if generator.is_generating() {
                warn!("timed out draining final terrain pass");
            }
        }
    }

    let mesh = generator.render_mesh();
    info!(
        frames = args.frames,
        passes,
        dropped,
        failed,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        collider_chunks = generator.collider_chunks().chunk_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "orbit demo complete"
    );
}

/// Waits out any outstanding pass and returns its report; `None` when no
/// pass was pending or the deadline ran out. The worker can finish between
/// a `poll` and the `is_generating` check, so the not-generating exit polls
/// once more before giving up.
fn drain_final_pass(generator: &mut PlanetGenerator, timeout: Duration) -> Option<PassReport> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(report) = generator.poll() {
            return Some(report);
        }
        if !generator.is_generating() {
            return generator.poll();
        }
        if Instant::now() > deadline {
            return None;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_consumes_pass_finished_between_checks() {
        let config = PlanetConfig {
            radius: 200.0,
            max_level: 2,
            heightfield: HeightfieldParams {
                octaves: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut generator = PlanetGenerator::new(config);
        let lens = FrustumLens {
            fov_y: 45f64.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 10_000.0,
        };
        let view = ViewState::orbiting(200.0, 400.0, 0.0, ORBIT_TILT, lens, 1920.0);
        assert!(generator.request_regeneration(&view));

        // Park until the worker has finished, leaving a completed report
        // behind with nothing having polled it yet.
        let deadline = Instant::now() + Duration::from_secs(30);
        while generator.is_generating() {
            assert!(Instant::now() < deadline, "pass never finished");
            std::thread::sleep(Duration::from_millis(1));
        }

        let report = drain_final_pass(&mut generator, Duration::from_secs(30));
        assert!(matches!(report, Some(Ok(_))));
    }

    #[test]
    fn test_drain_without_pending_pass_returns_none() {
        let mut generator = PlanetGenerator::new(PlanetConfig::default());
        assert!(drain_final_pass(&mut generator, Duration::from_millis(10)).is_none());
    }
}

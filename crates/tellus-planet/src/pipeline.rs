//! The full generation pass: traverse, displace, assemble, chunk.

use std::time::Instant;

use glam::DMat4;

use tellus_collider::ColliderChunkMap;
use tellus_icosphere::NodeArena;
use tellus_lod::{Frustum, LodTables};
use tellus_mesh::{MeshAssembler, MeshBuffers};
use tellus_terrain::Heightfield;

use crate::report::GenerationStats;
use crate::traverse::Traversal;
use crate::view::ViewState;
use crate::PlanetConfig;

/// Everything one pass produces. The three parts always come from the same
/// traversal, which is what makes the swap in the generator consistent.
#[derive(Debug)]
pub struct PassOutput {
    pub mesh: MeshBuffers,
    pub colliders: ColliderChunkMap,
    pub stats: GenerationStats,
}

/// Runs one complete generation pass synchronously.
///
/// Pure with respect to its inputs: identical config, view, and planet
/// transform always produce identical buffers. The generator calls this on
/// its worker thread; tests and benches call it directly.
pub fn generate_pass(
    config: &PlanetConfig,
    view: &ViewState,
    world_from_planet: &DMat4,
    tables: &LodTables,
    collider_resolution: u32,
) -> PassOutput {
    let start = Instant::now();

    let heightfield = Heightfield::new(config.heightfield.clone());
    let frustum = Frustum::from_camera(&view.lens, &view.world_from_view(), world_from_planet);
    let camera_local = world_from_planet.inverse().transform_point3(view.eye);

    let mut arena = NodeArena::with_capacity(1024);
    let mut assembler = MeshAssembler::new(config.smooth_shading);
    let mut colliders = ColliderChunkMap::with_resolution(collider_resolution);

    let traversal = Traversal::new(config, &heightfield, tables, &frustum, camera_local);
    let outcome = traversal.run(&mut arena, &mut |leaf| {
        assembler.push_triangle(leaf.corners);
        colliders.insert_triangle(leaf.corners.map(|c| c.position));
    });

    let mesh = assembler.finish();
    let stats = GenerationStats {
        vertices: mesh.vertex_count(),
        indices: mesh.indices.len(),
        triangles: mesh.triangle_count(),
        leaves: outcome.leaves,
        culled_nodes: outcome.culled,
        collider_chunks: colliders.chunk_count(),
        elapsed: start.elapsed(),
    };

    PassOutput {
        mesh,
        colliders,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use tellus_lod::FrustumLens;
    use tellus_terrain::HeightfieldParams;

    const RADIUS: f64 = 6371.0;
    const VIEWPORT_WIDTH: f64 = 1920.0;

    fn lens() -> FrustumLens {
        FrustumLens {
            fov_y: 45f64.to_radians(),
            aspect: 16.0 / 9.0,
            near: 1.0,
            far: RADIUS * 20.0,
        }
    }

    fn build_tables(config: &PlanetConfig) -> LodTables {
        LodTables::build(
            config.radius,
            config.max_altitude,
            lens().fov_y,
            VIEWPORT_WIDTH,
            48.0,
        )
    }

    fn view_at(eye: DVec3) -> ViewState {
        ViewState {
            eye,
            target: DVec3::ZERO,
            up: DVec3::Y,
            lens: lens(),
            viewport_width: VIEWPORT_WIDTH,
        }
    }

    fn run(config: &PlanetConfig, view: &ViewState) -> PassOutput {
        let tables = build_tables(config);
        generate_pass(config, view, &DMat4::IDENTITY, &tables, 64)
    }

    /// Flat sphere with no culling, capped at the given level.
    fn uncut_sphere_config(max_level: u8) -> PlanetConfig {
        PlanetConfig {
            radius: RADIUS,
            max_level,
            heightfield: HeightfieldParams {
                amplitude: 0.0,
                ..Default::default()
            },
            frustum_culling: false,
            backface_culling: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_earth_scenario_produces_geometry() {
        // Camera at three radii with the planet fully inside the frustum.
        let config = PlanetConfig {
            radius: RADIUS,
            max_altitude: 20.0,
            min_altitude: -10.0,
            max_level: 5,
            ..Default::default()
        };
        let output = run(&config, &view_at(DVec3::new(RADIUS * 3.0, 0.0, 0.0)));

        assert!(output.stats.vertices > 0);
        assert!(output.stats.indices > 0);
        assert!(output.stats.leaves > 0);
        assert!(!output.colliders.is_empty());
        assert_eq!(output.stats.vertices, output.mesh.vertex_count());
        assert_eq!(output.stats.triangles, output.mesh.triangle_count());
    }

    #[test]
    fn test_determinism_identical_inputs_identical_output() {
        let config = PlanetConfig {
            radius: RADIUS,
            max_level: 4,
            ..Default::default()
        };
        let view = view_at(DVec3::new(RADIUS * 2.5, RADIUS * 0.3, 0.0));

        let first = run(&config, &view);
        let second = run(&config, &view);
        assert_eq!(first.stats.vertices, second.stats.vertices);
        assert_eq!(first.stats.triangles, second.stats.triangles);
        assert_eq!(first.mesh.indices, second.mesh.indices);
        assert_eq!(first.colliders.chunk_count(), second.colliders.chunk_count());
    }

    #[test]
    fn test_level_zero_sphere_welds_to_icosahedron() {
        // 20 level-0 leaves on a flat sphere: welding must recover exactly
        // the 12 seed vertices, shared across base-face boundaries.
        let output = run(
            &uncut_sphere_config(0),
            &view_at(DVec3::new(RADIUS * 3.0, 0.0, 0.0)),
        );
        assert_eq!(output.stats.leaves, 20);
        assert_eq!(output.stats.vertices, 12);
        assert_eq!(output.stats.indices, 60);
    }

    #[test]
    fn test_level_one_sphere_welds_shared_edge_midpoints() {
        // Every base face splits once (camera at the center forces max
        // detail everywhere): 80 triangles, and Euler's formula pins the
        // welded vertex count to 42. Any crack along a shared edge, within
        // or across base faces, would show up as extra vertices.
        let output = run(&uncut_sphere_config(1), &view_at(DVec3::ZERO));
        assert_eq!(output.stats.leaves, 80);
        assert_eq!(output.stats.vertices, 42);
        assert_eq!(output.stats.indices, 240);
    }

    #[test]
    fn test_flat_shading_duplicates_corners() {
        let config = PlanetConfig {
            smooth_shading: false,
            ..uncut_sphere_config(1)
        };
        let output = run(&config, &view_at(DVec3::ZERO));
        assert_eq!(output.stats.leaves, 80);
        assert_eq!(output.stats.vertices, 240);
    }

    #[test]
    fn test_view_away_from_planet_yields_empty_output() {
        let config = PlanetConfig {
            radius: RADIUS,
            max_level: 3,
            ..Default::default()
        };
        let view = ViewState {
            eye: DVec3::new(RADIUS * 3.0, 0.0, 0.0),
            target: DVec3::new(RADIUS * 6.0, 0.0, 0.0),
            up: DVec3::Y,
            lens: lens(),
            viewport_width: VIEWPORT_WIDTH,
        };
        let output = run(&config, &view);
        assert!(output.mesh.is_empty());
        assert_eq!(output.stats.vertices, 0);
        assert_eq!(output.stats.culled_nodes, 20);
        assert!(output.colliders.is_empty());
    }

    #[test]
    fn test_planet_transform_offsets_culling() {
        // Same relative geometry, planet moved off origin: output counts
        // match the identity-transform run.
        let config = PlanetConfig {
            radius: RADIUS,
            max_level: 3,
            ..Default::default()
        };
        let offset = DVec3::new(50_000.0, -20_000.0, 10_000.0);
        let identity = run(&config, &view_at(DVec3::new(RADIUS * 3.0, 0.0, 0.0)));

        let tables = build_tables(&config);
        let shifted_view = ViewState {
            eye: DVec3::new(RADIUS * 3.0, 0.0, 0.0) + offset,
            target: offset,
            up: DVec3::Y,
            lens: lens(),
            viewport_width: VIEWPORT_WIDTH,
        };
        let shifted = generate_pass(
            &config,
            &shifted_view,
            &DMat4::from_translation(offset),
            &tables,
            64,
        );
        assert_eq!(identity.stats.vertices, shifted.stats.vertices);
        assert_eq!(identity.stats.triangles, shifted.stats.triangles);
    }

    #[test]
    fn test_collider_triangles_match_leaf_count() {
        let output = run(
            &uncut_sphere_config(2),
            &view_at(DVec3::new(RADIUS * 2.0, 0.0, 0.0)),
        );
        assert_eq!(output.colliders.triangle_count(), output.stats.leaves);
        assert!(output.stats.collider_chunks > 0);
        assert_eq!(output.stats.collider_chunks, output.colliders.chunk_count());
    }
}

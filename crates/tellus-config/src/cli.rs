//! Command-line argument parsing for the tellus demo.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Tellus command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "tellus", about = "Adaptive planetary terrain generator")]
pub struct CliArgs {
    /// Planet radius in planet units.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Heightfield seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Subdivision depth cap.
    #[arg(long)]
    pub max_subdivision: Option<u8>,

    /// Desired on-screen patch edge length in pixels.
    #[arg(long)]
    pub target_edge_px: Option<f64>,

    /// Orbit altitude above the planet surface.
    #[arg(long)]
    pub orbit_altitude: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Number of frames to simulate before exiting.
    #[arg(long, default_value_t = 120)]
    pub frames: u32,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(radius) = args.radius {
            self.planet.radius = radius;
        }
        if let Some(seed) = args.seed {
            self.planet.seed = seed;
        }
        if let Some(depth) = args.max_subdivision {
            self.planet.max_subdivision = depth;
        }
        if let Some(px) = args.target_edge_px {
            self.generation.target_edge_px = px;
        }
        if let Some(altitude) = args.orbit_altitude {
            self.camera.orbit_altitude = altitude;
        }
        if let Some(ref level) = args.log_level {
            self.logging.log_level = level.clone();
        }
    }
}

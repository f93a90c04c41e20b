//! Configuration for the tellus terrain toolkit.
//!
//! Runtime-configurable settings that persist to disk as RON files, with
//! forward/backward compatible serialization and hot-reload detection.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraSettings, Config, GenerationSettings, LoggingSettings, PlanetSettings,
    default_config_dir,
};
pub use error::ConfigError;

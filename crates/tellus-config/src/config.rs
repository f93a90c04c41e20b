//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Planet shape and heightfield settings.
    pub planet: PlanetSettings,
    /// Camera and projection settings.
    pub camera: CameraSettings,
    /// Generation pipeline tuning.
    pub generation: GenerationSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Planet shape and heightfield settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetSettings {
    /// Planet radius in planet units.
    pub radius: f64,
    /// Lowest altitude the terrain may reach below the sphere (negative).
    pub min_altitude: f64,
    /// Highest altitude the terrain may reach above the sphere.
    pub max_altitude: f64,
    /// Subdivision depth cap (hard-limited to 20 downstream).
    pub max_subdivision: u8,
    /// Heightfield seed for deterministic terrain.
    pub seed: u64,
    /// Number of noise octaves.
    pub octaves: u32,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// First-octave frequency in cycles across the unit sphere.
    pub base_frequency: f64,
    /// First-octave amplitude in planet units.
    pub amplitude: f64,
    /// Welded vertices with sphere normals; unwelded face normals otherwise.
    pub smooth_shading: bool,
}

/// Camera and projection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
    /// Near clip distance.
    pub near: f64,
    /// Far clip distance.
    pub far: f64,
    /// Viewport width in pixels (drives screen-space LOD thresholds).
    pub viewport_width: f64,
    /// Viewport height in pixels.
    pub viewport_height: f64,
    /// Orbit altitude above the planet surface for the demo camera.
    pub orbit_altitude: f64,
    /// Orbit angle advanced per frame, in degrees.
    pub orbit_step_degrees: f64,
}

/// Generation pipeline tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationSettings {
    /// Desired on-screen patch edge length in pixels.
    pub target_edge_px: f64,
    /// Collision grid cells along each UV axis.
    pub collider_grid_resolution: u32,
    /// Prune subtrees outside the view frustum.
    pub frustum_culling: bool,
    /// Prune subtrees facing away from the camera.
    pub backface_culling: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for PlanetSettings {
    fn default() -> Self {
        Self {
            radius: 6371.0,
            min_altitude: -10.0,
            max_altitude: 20.0,
            max_subdivision: 20,
            seed: 0,
            octaves: 6,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 2.0,
            amplitude: 8.0,
            smooth_shading: true,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 200_000.0,
            viewport_width: 1920.0,
            viewport_height: 1080.0,
            orbit_altitude: 12_000.0,
            orbit_step_degrees: 1.5,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            target_edge_px: 48.0,
            collider_grid_resolution: 64,
            frustum_culling: true,
            backface_culling: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl CameraSettings {
    /// Viewport width over height.
    pub fn aspect(&self) -> f64 {
        self.viewport_width / self.viewport_height
    }
}

/// The default config directory: the platform config root plus `tellus`.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tellus")
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let config = Self::read_from(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read_from(&config_dir.join("config.ron"))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read_from(config_path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::ReadError {
                path: config_path.to_path_buf(),
                source,
            })?;
        ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: config_path.to_path_buf(),
            source,
        })
    }
}

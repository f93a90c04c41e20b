use glam::DVec3;

use tellus_icosphere::MAX_SUBDIVISION;
use tellus_terrain::{Heightfield, HeightfieldParams};

/// Planet description consumed by the generation pipeline.
///
/// Externally owned and edited; the generator compares values between frames
/// (`Clone + PartialEq`) to decide when its lookup tables need a rebuild.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetConfig {
    /// Planet radius in planet units. Surface sits at this distance from the
    /// origin before displacement.
    pub radius: f64,
    /// Lowest altitude the heightfield may carve below the sphere. Negative.
    pub min_altitude: f64,
    /// Highest altitude the heightfield may raise above the sphere.
    pub max_altitude: f64,
    /// Requested subdivision cap; clamped to [`MAX_SUBDIVISION`] at use.
    pub max_level: u8,
    /// Procedural altitude field parameters.
    pub heightfield: HeightfieldParams,
    /// Welded vertices with sphere normals when true; unwelded per-face
    /// normals when false.
    pub smooth_shading: bool,
    pub frustum_culling: bool,
    pub backface_culling: bool,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 6371.0,
            min_altitude: -10.0,
            max_altitude: 20.0,
            max_level: MAX_SUBDIVISION,
            heightfield: HeightfieldParams::default(),
            smooth_shading: true,
            frustum_culling: true,
            backface_culling: true,
        }
    }
}

impl PlanetConfig {
    /// The effective subdivision cap: the configured value, never past the
    /// hard limit that bounds worst-case recursion.
    pub fn clamped_max_level(&self) -> u8 {
        self.max_level.min(MAX_SUBDIVISION)
    }

    /// Altitude clamped into the configured band.
    pub fn clamp_altitude(&self, altitude: f64) -> f64 {
        altitude.clamp(self.min_altitude, self.max_altitude)
    }

    /// Displaces a unit-sphere direction to its planet-local surface
    /// position: radius plus the clamped sampled altitude along the radial.
    pub fn displace(&self, field: &Heightfield, dir: DVec3) -> DVec3 {
        dir * (self.radius + self.clamp_altitude(field.sample(dir)))
    }
}

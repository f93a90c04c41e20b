use glam::{DMat4, DVec3};

use tellus_lod::FrustumLens;

/// World-space camera state for one generation pass.
///
/// The generator derives everything planet-local from this plus the planet
/// transform: the local camera position and the local frustum plane set.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub eye: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    pub lens: FrustumLens,
    /// Viewport width in pixels; drives the screen-space LOD thresholds.
    pub viewport_width: f64,
}

impl ViewState {
    /// Camera pose as a world-from-view matrix.
    pub fn world_from_view(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye, self.target, self.up).inverse()
    }

    /// A camera orbiting the planet origin at the given altitude above the
    /// surface, looking at the center. `orbit_angle` sets the horizontal
    /// position on the orbit, `tilt` the elevation out of the equator plane.
    pub fn orbiting(
        planet_radius: f64,
        altitude: f64,
        orbit_angle: f64,
        tilt: f64,
        lens: FrustumLens,
        viewport_width: f64,
    ) -> Self {
        let dist = planet_radius + altitude;
        let eye = DVec3::new(
            orbit_angle.sin() * dist * tilt.cos(),
            dist * tilt.sin(),
            orbit_angle.cos() * dist * tilt.cos(),
        );
        Self {
            eye,
            target: DVec3::ZERO,
            up: DVec3::Y,
            lens,
            viewport_width,
        }
    }
}

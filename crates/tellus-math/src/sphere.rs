use glam::{DVec2, DVec3};

/// Equirectangular UV for a unit direction: u from the longitude around Y,
/// v from the latitude, both mapped into [0, 1].
///
/// Uses libm so the same direction maps to the same UV on every platform;
/// vertex welding and collider bucketing both key off this.
pub fn uv_from_unit(dir: DVec3) -> DVec2 {
    let theta = libm::atan2(dir.z, dir.x);
    let phi = libm::asin(dir.y.clamp(-1.0, 1.0));

    DVec2::new(
        theta / std::f64::consts::TAU + 0.5,
        phi / std::f64::consts::PI + 0.5,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uv_in_unit_square() {
        let dirs = [
            DVec3::X,
            -DVec3::X,
            DVec3::Y,
            -DVec3::Y,
            DVec3::Z,
            -DVec3::Z,
            DVec3::new(1.0, 1.0, 1.0).normalize(),
        ];
        for dir in dirs {
            let uv = uv_from_unit(dir);
            assert!((0.0..=1.0).contains(&uv.x), "u out of range for {dir:?}");
            assert!((0.0..=1.0).contains(&uv.y), "v out of range for {dir:?}");
        }
    }

    #[test]
    fn test_uv_poles() {
        assert!((uv_from_unit(DVec3::Y).y - 1.0).abs() < 1e-12);
        assert!((uv_from_unit(-DVec3::Y).y).abs() < 1e-12);
    }

    #[test]
    fn test_uv_equator_midpoint() {
        let uv = uv_from_unit(DVec3::X);
        assert!((uv.x - 0.5).abs() < 1e-12);
        assert!((uv.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_uv_deterministic() {
        let dir = DVec3::new(0.3, -0.7, 0.648).normalize();
        assert_eq!(uv_from_unit(dir), uv_from_unit(dir));
    }
}

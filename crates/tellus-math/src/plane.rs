use glam::DVec3;

/// A plane in normal/offset form: points p with dot(normal, p) == d lie on
/// the plane. The normal is unit length; the positive half-space is the side
/// the normal points into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DPlane {
    pub normal: DVec3,
    pub d: f64,
}

impl DPlane {
    pub fn new(normal: DVec3, d: f64) -> Self {
        Self { normal, d }
    }

    /// Builds the plane through three points. The normal follows the
    /// right-hand rule over (b - a, c - a); callers pick the winding so the
    /// normal faces the half-space they care about.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Self {
        let normal = (b - a).cross(c - a).normalize();
        Self {
            normal,
            d: normal.dot(a),
        }
    }

    /// Signed distance from the point to the plane. Positive on the side the
    /// normal points into.
    pub fn signed_distance(&self, p: DVec3) -> f64 {
        self.normal.dot(p) - self.d
    }

    /// Returns true if the point is on the positive side or on the plane.
    pub fn contains_point(&self, p: DVec3) -> bool {
        self.signed_distance(p) >= 0.0
    }
}

use glam::DVec3;

/// Arithmetic mean of the three corners.
pub fn triangle_centroid(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    (a + b + c) / 3.0
}

/// Unit normal of the triangle via the cross product of its edges.
/// Degenerate triangles yield a zero vector instead of NaN.
pub fn triangle_normal(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Area of the triangle. Zero for degenerate triangles.
pub fn triangle_area(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    (b - a).cross(c - a).length() * 0.5
}

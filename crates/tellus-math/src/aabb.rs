use glam::DVec3;

/// Axis-aligned bounding box in f64 planet-local space.
///
/// Invariant: min.x <= max.x, min.y <= max.y, min.z <= max.z.
/// The constructor enforces this by swapping components if needed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DAabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl DAabb {
    /// Create an AABB from two corners. Automatically sorts
    /// components so that min <= max on every axis.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create an AABB from a center point and half-extents.
    pub fn from_center_half_extents(center: DVec3, half: DVec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest AABB enclosing all points. Returns `None` for an
    /// empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self {
            min: first,
            max: first,
        };
        for p in iter {
            aabb.expand_to(p);
        }
        Some(aabb)
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains_point(&self, p: DVec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Returns true if this AABB overlaps with other
    /// (including touching edges/faces).
    pub fn intersects(&self, other: &DAabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Returns the smallest AABB enclosing both self and other.
    pub fn union(&self, other: &DAabb) -> DAabb {
        DAabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grows the box in place to include the point.
    pub fn expand_to(&mut self, p: DVec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Returns a new AABB expanded by `margin` on each side
    /// (6 faces expanded outward).
    pub fn expand_by(&self, margin: f64) -> DAabb {
        DAabb {
            min: self.min - DVec3::splat(margin),
            max: self.max + DVec3::splat(margin),
        }
    }

    /// Returns the center point of the AABB.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the size along each axis.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Returns true if the AABB has zero extent on at least one axis.
    pub fn is_degenerate(&self) -> bool {
        self.min.x == self.max.x || self.min.y == self.max.y || self.min.z == self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_inside() {
        let aabb = DAabb::new(DVec3::ZERO, DVec3::splat(10.0));
        assert!(aabb.contains_point(DVec3::splat(5.0)));
    }

    #[test]
    fn test_contains_point_outside() {
        let aabb = DAabb::new(DVec3::ZERO, DVec3::splat(10.0));
        assert!(!aabb.contains_point(DVec3::new(11.0, 5.0, 5.0)));
    }

    #[test]
    fn test_contains_point_on_boundary() {
        let aabb = DAabb::new(DVec3::ZERO, DVec3::splat(10.0));
        assert!(aabb.contains_point(DVec3::ZERO));
        assert!(aabb.contains_point(DVec3::splat(10.0)));
        assert!(aabb.contains_point(DVec3::new(10.0, 5.0, 5.0)));
    }

    #[test]
    fn test_constructor_auto_sorts() {
        let aabb = DAabb::new(DVec3::splat(10.0), DVec3::ZERO);
        assert_eq!(aabb.min, DVec3::ZERO);
        assert_eq!(aabb.max, DVec3::splat(10.0));
    }

    #[test]
    fn test_from_points_encloses_all() {
        let points = [
            DVec3::new(1.0, -2.0, 3.0),
            DVec3::new(-4.0, 5.0, 0.0),
            DVec3::new(2.0, 2.0, 2.0),
        ];
        let aabb = DAabb::from_points(points).unwrap();
        for p in points {
            assert!(aabb.contains_point(p));
        }
        assert_eq!(aabb.min, DVec3::new(-4.0, -2.0, 0.0));
        assert_eq!(aabb.max, DVec3::new(2.0, 5.0, 3.0));
    }

    #[test]
    fn test_from_points_empty() {
        assert!(DAabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_intersects_overlapping() {
        let a = DAabb::new(DVec3::ZERO, DVec3::splat(10.0));
        let b = DAabb::new(DVec3::splat(5.0), DVec3::splat(15.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_intersects_disjoint() {
        let a = DAabb::new(DVec3::ZERO, DVec3::splat(10.0));
        let b = DAabb::new(DVec3::splat(20.0), DVec3::splat(30.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_union_encloses_both() {
        let a = DAabb::new(DVec3::ZERO, DVec3::splat(5.0));
        let b = DAabb::new(DVec3::splat(3.0), DVec3::splat(10.0));
        let u = a.union(&b);
        assert_eq!(u.min, DVec3::ZERO);
        assert_eq!(u.max, DVec3::splat(10.0));
    }

    #[test]
    fn test_expand_to_grows() {
        let mut aabb = DAabb::new(DVec3::ZERO, DVec3::splat(1.0));
        aabb.expand_to(DVec3::new(-2.0, 0.5, 3.0));
        assert_eq!(aabb.min, DVec3::new(-2.0, 0.0, 0.0));
        assert_eq!(aabb.max, DVec3::new(1.0, 1.0, 3.0));
    }

    #[test]
    fn test_expand_by() {
        let aabb = DAabb::new(DVec3::splat(5.0), DVec3::splat(15.0));
        let expanded = aabb.expand_by(2.0);
        assert_eq!(expanded.min, DVec3::splat(3.0));
        assert_eq!(expanded.max, DVec3::splat(17.0));
    }

    #[test]
    fn test_center() {
        let aabb = DAabb::new(DVec3::ZERO, DVec3::splat(10.0));
        assert_eq!(aabb.center(), DVec3::splat(5.0));
    }

    #[test]
    fn test_size() {
        let aabb = DAabb::new(DVec3::new(2.0, 3.0, 4.0), DVec3::new(12.0, 13.0, 14.0));
        assert_eq!(aabb.size(), DVec3::splat(10.0));
    }

    #[test]
    fn test_is_degenerate() {
        let flat = DAabb::new(DVec3::new(5.0, 0.0, 0.0), DVec3::new(5.0, 10.0, 10.0));
        assert!(flat.is_degenerate());
        let solid = DAabb::new(DVec3::ZERO, DVec3::splat(10.0));
        assert!(!solid.is_degenerate());
    }
}

//! Six-plane view frustum with a planet-local plane set for per-node tests.

use glam::{DMat4, DVec3};

use tellus_math::DPlane;

/// Slack applied to every plane test so culling is forgiving near plane
/// boundaries; a vertex counts as rejected only when it sits clearly behind.
pub const CULL_TOLERANCE: f64 = -0.01;

const NEAR: usize = 0;
const FAR: usize = 1;
const LEFT: usize = 2;
const RIGHT: usize = 3;
const TOP: usize = 4;
const BOTTOM: usize = 5;

/// Result of classifying a triangle against the six planes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Containment {
    /// Entirely inside all planes.
    Contains,
    /// Straddles at least one plane.
    Intersects,
    /// Entirely behind at least one plane.
    Outside,
}

/// Projection parameters the frustum shape is derived from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrustumLens {
    /// Vertical field of view in radians.
    pub fov_y: f64,
    /// Viewport width over height.
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl FrustumLens {
    /// The eight corner points in view space (right-handed, looking down -Z):
    /// near bottom-left/bottom-right/top-right/top-left, then the same four
    /// on the far plane.
    fn corners(&self) -> [DVec3; 8] {
        let tan_half = libm::tan(self.fov_y * 0.5);
        let near_h = tan_half * self.near;
        let near_w = near_h * self.aspect;
        let far_h = tan_half * self.far;
        let far_w = far_h * self.aspect;

        [
            DVec3::new(-near_w, -near_h, -self.near),
            DVec3::new(near_w, -near_h, -self.near),
            DVec3::new(near_w, near_h, -self.near),
            DVec3::new(-near_w, near_h, -self.near),
            DVec3::new(-far_w, -far_h, -self.far),
            DVec3::new(far_w, -far_h, -self.far),
            DVec3::new(far_w, far_h, -self.far),
            DVec3::new(-far_w, far_h, -self.far),
        ]
    }
}

/// View frustum as six inward-facing planes, kept in two spaces: world space
/// for general queries and planet-local space so subdivision tests run
/// without per-node transforms.
#[derive(Clone, Debug)]
pub struct Frustum {
    world_planes: [DPlane; 6],
    local_planes: [DPlane; 6],
}

impl Frustum {
    /// Builds both plane sets from the lens, the camera pose
    /// (`world_from_view`), and the planet transform (`world_from_planet`).
    pub fn from_camera(
        lens: &FrustumLens,
        world_from_view: &DMat4,
        world_from_planet: &DMat4,
    ) -> Self {
        let view_corners = lens.corners();
        let world_corners = view_corners.map(|c| world_from_view.transform_point3(c));

        let planet_from_world = world_from_planet.inverse();
        let local_corners = world_corners.map(|c| planet_from_world.transform_point3(c));

        Self {
            world_planes: planes_from_corners(&world_corners),
            local_planes: planes_from_corners(&local_corners),
        }
    }

    /// Classifies a world-space triangle against the six planes. No slack,
    /// no volume inflation.
    pub fn contains_triangle(&self, p1: DVec3, p2: DVec3, p3: DVec3) -> Containment {
        let mut result = Containment::Contains;
        for plane in &self.world_planes {
            let rejects = [p1, p2, p3]
                .iter()
                .filter(|&&p| plane.signed_distance(p) < 0.0)
                .count();
            if rejects == 3 {
                return Containment::Outside;
            }
            if rejects > 0 {
                result = Containment::Intersects;
            }
        }
        result
    }

    /// Classifies a planet-local triangle treated as a volume: when all three
    /// corners fall behind one plane, the same corners scaled radially
    /// outward and inward by `height_mult` get a second chance before the
    /// node is declared outside. `height_mult` must be >= 1.
    pub fn contains_triangle_volume(
        &self,
        p1: DVec3,
        p2: DVec3,
        p3: DVec3,
        height_mult: f64,
    ) -> Containment {
        let corners = [p1, p2, p3];
        let mut result = Containment::Contains;

        for plane in &self.local_planes {
            let rejects = corners
                .iter()
                .filter(|&&p| plane.signed_distance(p) < CULL_TOLERANCE)
                .count();

            if rejects == 3 {
                let displaced_rejects = corners
                    .iter()
                    .flat_map(|&p| [p * height_mult, p / height_mult])
                    .filter(|&p| plane.signed_distance(p) < CULL_TOLERANCE)
                    .count();
                if displaced_rejects == 6 {
                    return Containment::Outside;
                }
                result = Containment::Intersects;
            } else if rejects > 0 {
                result = Containment::Intersects;
            }
        }

        result
    }
}

/// Builds the six inward-facing planes from the eight corner points. Corner
/// winding is chosen so every cross product faces into the volume.
fn planes_from_corners(c: &[DVec3; 8]) -> [DPlane; 6] {
    let [nbl, nbr, ntr, ntl, fbl, fbr, ftr, ftl] = *c;

    let mut planes = [DPlane::new(DVec3::Z, 0.0); 6];
    planes[NEAR] = DPlane::from_points(nbl, ntl, nbr);
    planes[FAR] = DPlane::from_points(fbl, fbr, ftl);
    planes[LEFT] = DPlane::from_points(nbl, fbl, ntl);
    planes[RIGHT] = DPlane::from_points(nbr, ntr, fbr);
    planes[TOP] = DPlane::from_points(ntr, ntl, ftr);
    planes[BOTTOM] = DPlane::from_points(nbl, nbr, fbl);
    planes
}

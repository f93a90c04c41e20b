//! Per-level lookup tables, rebuilt only when planet or viewport parameters
//! change, never per frame.

use glam::DVec3;

use tellus_icosphere::{BaseIcosahedron, MAX_SUBDIVISION};

/// Number of entries in every table: one per level 0..=MAX_SUBDIVISION.
const TABLE_LEN: usize = MAX_SUBDIVISION as usize + 1;

/// Camera-distance thresholds per subdivision level.
///
/// `threshold(level)` is the distance below which a level-`level` patch is
/// too coarse: its edge would span more than the target number of pixels on
/// screen, so the node must split. Derived from the projected edge length at
/// the configured field of view and viewport width; strictly decreasing with
/// level since each split halves the edge.
#[derive(Clone, Debug)]
pub struct DistanceLut {
    thresholds: Vec<f64>,
}

impl DistanceLut {
    pub fn build(radius: f64, fov_y: f64, viewport_width: f64, target_edge_px: f64) -> Self {
        let base_edge = BaseIcosahedron::new().edge_length() * radius;
        let scale = viewport_width / (2.0 * libm::tan(fov_y * 0.5) * target_edge_px);

        let thresholds = (0..TABLE_LEN)
            .map(|level| base_edge / f64::from(1u32 << level) * scale)
            .collect();

        Self { thresholds }
    }

    /// Distance below which a node at `level` must split.
    pub fn threshold(&self, level: u8) -> f64 {
        self.thresholds[(level as usize).min(TABLE_LEN - 1)]
    }

    /// Subdivision level the table demands at a camera distance: the first
    /// level whose threshold the distance meets, capped at MAX_SUBDIVISION.
    pub fn required_level(&self, distance: f64) -> u8 {
        for (level, &threshold) in self.thresholds.iter().enumerate() {
            if distance >= threshold {
                return level as u8;
            }
        }
        MAX_SUBDIVISION
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

/// Per-level backface-cull cutoffs.
///
/// A face whose outward direction points away from the camera beyond the
/// cutoff is invisible behind the horizon. Shallow levels get a cutoff
/// widened by the curvature of the whole patch; the widening shrinks as
/// patches flatten out with depth.
#[derive(Clone, Debug)]
pub struct FaceDotLut {
    values: Vec<f64>,
}

impl FaceDotLut {
    pub fn build(radius: f64, max_altitude: f64) -> Self {
        let culling_angle = libm::acos(radius / (radius + max_altitude));

        let mut values = Vec::with_capacity(TABLE_LEN);
        values.push(0.5 + libm::sin(culling_angle));

        let mut angle = libm::acos(0.5);
        for _ in 1..TABLE_LEN {
            angle *= 0.5;
            values.push(libm::sin(angle + culling_angle));
        }

        Self { values }
    }

    /// Dot-product cutoff for a node at `level`.
    pub fn cutoff(&self, level: u8) -> f64 {
        self.values[(level as usize).min(TABLE_LEN - 1)]
    }
}

/// Per-level radial inflation factors bounding an unsubdivided node.
///
/// A patch's interior bulges above its corner chord by the sphere curvature,
/// and displacement can add up to `max_altitude` on top. Multiplying a corner
/// by `factor(level)` therefore bounds everything the node can ever produce.
/// Values are always >= 1.
#[derive(Clone, Debug)]
pub struct HeightMultLut {
    values: Vec<f64>,
}

impl HeightMultLut {
    pub fn build(radius: f64, max_altitude: f64) -> Self {
        let base = BaseIcosahedron::new();
        let [mut a, mut b, mut c] = base.face_corners(0);
        let center = (a + b + c).normalize();
        let norm_max_altitude = max_altitude / radius;

        let mut values = Vec::with_capacity(TABLE_LEN);
        values.push(1.0 / a.dot(center) + norm_max_altitude);

        // Contract toward the face center level by level; the corner-to-center
        // angle halves, so the curvature bulge of a node at that level shrinks
        // accordingly.
        for _ in 1..TABLE_LEN {
            let mid_a: DVec3 = (b + (c - b) * 0.5).normalize();
            let mid_b: DVec3 = (c + (a - c) * 0.5).normalize();
            let mid_c: DVec3 = (a + (b - a) * 0.5).normalize();
            a = mid_a;
            b = mid_b;
            c = mid_c;
            values.push(1.0 / a.dot(center).min(1.0) + norm_max_altitude);
        }

        Self { values }
    }

    /// Radial bounding factor for a node at `level`.
    pub fn factor(&self, level: u8) -> f64 {
        self.values[(level as usize).min(TABLE_LEN - 1)]
    }
}

/// The three tables bundled, built from one parameter set.
#[derive(Clone, Debug)]
pub struct LodTables {
    pub distance: DistanceLut,
    pub face_dot: FaceDotLut,
    pub height_mult: HeightMultLut,
}

impl LodTables {
    pub fn build(
        radius: f64,
        max_altitude: f64,
        fov_y: f64,
        viewport_width: f64,
        target_edge_px: f64,
    ) -> Self {
        Self {
            distance: DistanceLut::build(radius, fov_y, viewport_width, target_edge_px),
            face_dot: FaceDotLut::build(radius, max_altitude),
            height_mult: HeightMultLut::build(radius, max_altitude),
        }
    }
}

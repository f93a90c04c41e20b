//! The SPLIT/LEAF/CULL decision walk over the subdivision arena.

use glam::DVec3;

use tellus_icosphere::{BaseIcosahedron, NodeArena, NodeId};
use tellus_lod::{Containment, Frustum, LodTables};
use tellus_mesh::LeafCorner;
use tellus_terrain::Heightfield;

use crate::PlanetConfig;

/// Bias added to the per-level backface cutoff, keeping near-horizon faces
/// alive a little past the geometric threshold.
pub const BACKFACE_MARGIN: f64 = 0.1;

/// One emitted leaf: displaced corners in winding order plus the level the
/// traversal stopped at.
#[derive(Clone, Copy, Debug)]
pub struct LeafTriangle {
    pub corners: [LeafCorner; 3],
    pub level: u8,
}

/// Counters for one traversal pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraversalOutcome {
    pub nodes_visited: usize,
    pub leaves: usize,
    pub culled: usize,
}

/// One pass's traversal over the 20 base faces.
///
/// Borrows everything it consults; owns nothing. Per node it applies, in
/// order: the height-inflated frustum volume test, the curvature-aware
/// backface test, then the distance-driven split decision. Recursion depth is
/// bounded by the subdivision cap, so degenerate triangles terminate too.
pub struct Traversal<'a> {
    config: &'a PlanetConfig,
    heightfield: &'a Heightfield,
    tables: &'a LodTables,
    frustum: &'a Frustum,
    /// Camera position in planet-local space.
    camera: DVec3,
}

impl<'a> Traversal<'a> {
    pub fn new(
        config: &'a PlanetConfig,
        heightfield: &'a Heightfield,
        tables: &'a LodTables,
        frustum: &'a Frustum,
        camera: DVec3,
    ) -> Self {
        Self {
            config,
            heightfield,
            tables,
            frustum,
            camera,
        }
    }

    /// Seeds the arena with the base faces and walks every root, feeding each
    /// surviving leaf to `sink`.
    pub fn run(
        &self,
        arena: &mut NodeArena,
        sink: &mut impl FnMut(LeafTriangle),
    ) -> TraversalOutcome {
        let base = BaseIcosahedron::new();
        let roots = arena.seed_base(&base);

        let mut outcome = TraversalOutcome::default();
        for root in roots {
            self.visit(arena, root, self.config.frustum_culling, sink, &mut outcome);
        }
        outcome
    }

    fn visit(
        &self,
        arena: &mut NodeArena,
        id: NodeId,
        frustum_active: bool,
        sink: &mut impl FnMut(LeafTriangle),
        outcome: &mut TraversalOutcome,
    ) {
        outcome.nodes_visited += 1;

        let (a, b, c, level) = {
            let node = arena.node(id);
            (node.a, node.b, node.c, node.level)
        };
        let radius = self.config.radius;

        // A CONTAINS result proves the whole subtree visible; children skip
        // plane classification below that node.
        let mut child_frustum_active = frustum_active;
        if frustum_active {
            let mult = self.tables.height_mult.factor(level);
            match self
                .frustum
                .contains_triangle_volume(a * radius, b * radius, c * radius, mult)
            {
                Containment::Outside => {
                    outcome.culled += 1;
                    return;
                }
                Containment::Contains => child_frustum_active = false,
                Containment::Intersects => {}
            }
        }

        if self.config.backface_culling {
            let outward = ((a + b + c) / 3.0).normalize();
            let view_dir = (outward * radius - self.camera).normalize_or_zero();
            if outward.dot(view_dir) >= self.tables.face_dot.cutoff(level) + BACKFACE_MARGIN {
                outcome.culled += 1;
                return;
            }
        }

        let pa = self.config.displace(self.heightfield, a);
        let pb = self.config.displace(self.heightfield, b);
        let pc = self.config.displace(self.heightfield, c);
        let distance = (pa - self.camera)
            .length()
            .min((pb - self.camera).length())
            .min((pc - self.camera).length());

        if distance < self.tables.distance.threshold(level)
            && level < self.config.clamped_max_level()
        {
            for child in arena.split(id) {
                self.visit(arena, child, child_frustum_active, sink, outcome);
            }
            return;
        }

        outcome.leaves += 1;
        sink(LeafTriangle {
            corners: [
                LeafCorner {
                    dir: a,
                    position: pa,
                },
                LeafCorner {
                    dir: b,
                    position: pb,
                },
                LeafCorner {
                    dir: c,
                    position: pc,
                },
            ],
            level,
        });
    }
}

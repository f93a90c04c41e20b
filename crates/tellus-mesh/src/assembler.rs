use glam::DVec3;

use tellus_math::{triangle_normal, uv_from_unit};

use crate::{CpuVertex, MeshBuffers, VertexWelder, WELD_EPSILON};

/// One corner of a leaf triangle as the traversal hands it over: the
/// pre-displacement unit direction and the displaced planet-local position.
#[derive(Clone, Copy, Debug)]
pub struct LeafCorner {
    pub dir: DVec3,
    pub position: DVec3,
}

/// Accumulates leaf triangles into shared vertex/index buffers.
///
/// Smooth shading welds corners through a position hash so edges shared
/// between traversal branches index the same vertex, and normals are the
/// analytic sphere directions. Flat shading emits three vertices per face
/// carrying the displaced-face normal; those can never share, so welding is
/// skipped entirely.
pub struct MeshAssembler {
    buffers: MeshBuffers,
    welder: VertexWelder,
    smooth_shading: bool,
}

impl MeshAssembler {
    pub fn new(smooth_shading: bool) -> Self {
        Self::with_epsilon(smooth_shading, WELD_EPSILON)
    }

    pub fn with_epsilon(smooth_shading: bool, epsilon: f64) -> Self {
        Self {
            buffers: MeshBuffers::new(),
            welder: VertexWelder::with_epsilon(epsilon),
            smooth_shading,
        }
    }

    /// Appends one leaf triangle, corners in winding order.
    pub fn push_triangle(&mut self, corners: [LeafCorner; 3]) {
        if self.smooth_shading {
            for corner in corners {
                let index = self.weld_corner(corner);
                self.buffers.indices.push(index);
            }
        } else {
            let face_normal = triangle_normal(
                corners[0].position,
                corners[1].position,
                corners[2].position,
            );
            for corner in corners {
                let index = self.buffers.vertices.len() as u32;
                self.buffers.vertices.push(CpuVertex::new(
                    corner.position,
                    face_normal,
                    uv_from_unit(corner.dir),
                ));
                self.buffers.indices.push(index);
            }
        }
    }

    fn weld_corner(&mut self, corner: LeafCorner) -> u32 {
        if let Some(index) = self.welder.find(corner.position) {
            return index;
        }
        let index = self.buffers.vertices.len() as u32;
        self.buffers.vertices.push(CpuVertex::new(
            corner.position,
            corner.dir,
            uv_from_unit(corner.dir),
        ));
        self.welder.insert(corner.position, index);
        index
    }

    pub fn vertex_count(&self) -> usize {
        self.buffers.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.buffers.triangle_count()
    }

    /// Consumes the assembler, yielding the finished buffers.
    pub fn finish(self) -> MeshBuffers {
        self.buffers
    }
}

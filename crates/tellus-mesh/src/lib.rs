//! Mesh output stage: vertex format, epsilon welding, and leaf-triangle
//! assembly into shared vertex/index buffers.

mod assembler;
mod vertex;
mod weld;

pub use assembler::{LeafCorner, MeshAssembler};
pub use vertex::{CpuVertex, MeshBuffers};
pub use weld::{VertexWelder, WELD_EPSILON};

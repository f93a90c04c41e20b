//! Icosahedron seed mesh and the subdivision patch arena built on top of it.

mod arena;
mod base;

pub use arena::{NodeArena, NodeId, PatchNode};
pub use base::BaseIcosahedron;

/// Hard cap on subdivision depth. Traversal never recurses past this level
/// regardless of camera distance, bounding worst-case tree size.
pub const MAX_SUBDIVISION: u8 = 20;

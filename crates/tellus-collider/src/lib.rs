//! Spatial bucketing of leaf triangles into coarse collision chunks.
//!
//! The physics collaborator's broad-phase queries one chunk's bounding box at
//! a time instead of the whole planet mesh, so collision tests only ever touch
//! geometry near the query point.

mod chunk;

pub use chunk::{ChunkKey, ColliderChunk, ColliderChunkMap, DEFAULT_GRID_RESOLUTION};

//! Deterministic procedural altitude sampling over the unit sphere.

mod heightfield;

pub use heightfield::{Heightfield, HeightfieldParams};

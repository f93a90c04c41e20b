//! Level-of-detail decision machinery: per-level lookup tables and the
//! six-plane frustum classifier that drive subdivision.

mod frustum;
mod tables;

pub use frustum::{CULL_TOLERANCE, Containment, Frustum, FrustumLens};
pub use tables::{DistanceLut, FaceDotLut, HeightMultLut, LodTables};

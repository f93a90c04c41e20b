//! Adaptive planetary terrain generation.
//!
//! Turns a planet description plus a camera into a renderable triangle mesh
//! and a set of collision chunks, continuously and asynchronously as the
//! camera moves. Traversal subdivides the 20 icosahedron base faces top-down,
//! deciding SPLIT/LEAF/CULL per node from the LOD tables and the view
//! frustum; leaves feed the mesh assembler and the collider chunker; a
//! background worker hands the finished buffers to the render thread through
//! [`PlanetGenerator`].

mod config;
mod generator;
mod pipeline;
mod report;
mod traverse;
mod view;

pub use config::PlanetConfig;
pub use generator::{GeneratorOptions, PlanetGenerator};
pub use pipeline::{PassOutput, generate_pass};
pub use report::{GenerationError, GenerationStats, PassReport};
pub use traverse::{BACKFACE_MARGIN, LeafTriangle, Traversal, TraversalOutcome};
pub use view::ViewState;

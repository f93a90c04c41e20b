//! f64 geometry primitives for planet-scale terrain: bounding boxes, planes,
//! spherical mapping, and triangle helpers.

mod aabb;
mod plane;
mod sphere;
mod triangle;

pub use aabb::DAabb;
pub use plane::DPlane;
pub use sphere::uv_from_unit;
pub use triangle::{triangle_area, triangle_centroid, triangle_normal};

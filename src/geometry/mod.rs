//! Geometry utilities: bounding volumes, framing distances, clip planes,
//! and ray intersection.

pub mod bounds;
pub mod framing;
pub mod ray;

pub use bounds::{compute_bounds, Aabb, Bounds};
pub use framing::{
    focus_distance, fov_distance, framing_distance, ClipPlanes, OrbitLimits,
};
pub use ray::Ray;

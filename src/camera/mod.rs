//! Camera system for 3D model viewing.
//!
//! Provides the perspective camera with screen-ray construction and the
//! damped orbit controller that spins and dollies it around a target.

/// Orbit controller managing rotation, zoom, damping, and distance limits.
pub mod controller;
/// Core camera struct and pose type.
pub mod core;

pub use self::controller::OrbitControls;
pub use self::core::{Camera, CameraPose};

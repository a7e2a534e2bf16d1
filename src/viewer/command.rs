//! The viewer's complete interactive vocabulary.
//!
//! Every user-facing operation, whether it comes from a pointer gesture or
//! a programmatic call, is represented as a `ViewerCommand`. Consumers
//! construct commands (usually through
//! [`InputProcessor`](crate::input::InputProcessor)) and pass them to
//! [`ViewerSession::execute`](super::ViewerSession::execute).

use glam::Vec2;

/// A single viewer operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    /// Spin the camera around the orbit target by a pointer drag.
    Orbit {
        /// Drag distance in physical pixels since the last event.
        delta: Vec2,
    },
    /// Dolly toward (positive) or away from (negative) the target.
    Zoom {
        /// Wheel steps.
        delta: f32,
    },
    /// Double-click at a surface position: focus the sub-object under it,
    /// or return to the pre-focus view on empty space.
    Pick {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// The render surface changed size.
    Resize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
}

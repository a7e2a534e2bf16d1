//! Input handling: event types, the click state machine, and the input
//! processor that converts raw window events into viewer commands.

/// Platform-agnostic input events.
pub mod event;
/// Double-click state machine and pointer tracking.
pub(crate) mod mouse;
/// Converts raw events into viewer commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use processor::InputProcessor;

//! Camera transition engine: easing curves, the transition value object,
//! and the animator that owns the single in-flight transition.

mod animator;
pub mod easing;
pub mod transition;

pub use animator::CameraAnimator;
pub use easing::EasingFunction;
pub use transition::CameraTransition;

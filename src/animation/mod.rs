pub mod easing;
pub mod transitions;

// Re-export commonly used types and functions for convenience
pub use easing::EasingType;
pub use transitions::{CameraFrame, Transition, TransitionState, TransitionType};

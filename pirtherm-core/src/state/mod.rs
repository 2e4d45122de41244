//! Motion state machine
//!
//! Two states, two events. All display and sensing behavior is a function
//! of the current state and the event that moved it.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{ActivationWindow, MotionState};

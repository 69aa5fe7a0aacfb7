//! Display mode state machine
//!
//! Defines which screen the device shows. Transitions are driven only by
//! gestures and by time spent in the current mode.

pub mod machine;

pub use machine::{DisplayMode, ModeInput, ModeMachineState, ModeStateMachine};

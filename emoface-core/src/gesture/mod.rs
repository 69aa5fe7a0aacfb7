//! Touch gesture recognition
//!
//! Turns the raw touch-pad level into discrete tap gestures. A single tap is
//! only reported once the double-tap window has closed, so every single tap
//! carries a fixed latency equal to that window.

pub mod event;
pub mod recognizer;

pub use event::GestureEvent;
pub use recognizer::{RecognizerState, TouchGestureRecognizer, TouchPoll};

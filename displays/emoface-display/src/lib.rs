//! Screen rendering for the Emoface status display
//!
//! This crate provides:
//! - `Screen`, a character grid with per-row dirty tracking
//! - `DisplayBackend` trait for whatever actually shows the grid
//! - `FrameBackend`, a backend that streams the grid to a display module
//!   over any `embedded_io::Write` using the link protocol
//! - `FaceAnimator` for the idle and happy faces
//! - The weather screen layout
//! - `ScreenRenderer`, tying the above to the core's `ModeRenderer`
//!
//! # Architecture
//!
//! ```text
//! FaceController ──render()──▶ ScreenRenderer ──▶ Screen ──flush──▶ DisplayBackend
//!                                  │                                    │
//!                            FaceAnimator / weather            FrameBackend (UART)
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod face;
pub mod renderer;
pub mod screen;
pub mod weather;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError, FrameBackend};
pub use face::{Expression, FaceAnimator};
pub use renderer::ScreenRenderer;
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};

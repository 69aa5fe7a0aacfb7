//! Collaborator traits
//!
//! These traits define the interface between the control loop and the
//! hardware or network implementations it drives.

pub mod display;
pub mod sensor;
pub mod telemetry;
pub mod touch;

pub use display::ModeRenderer;
pub use sensor::ClimateSensor;
pub use telemetry::{Connectivity, TelemetrySink};
pub use touch::TouchInput;

//! Mode renderer trait

use crate::mode::DisplayMode;
use crate::sensor::SensorReading;

/// Draws the current display mode
///
/// Called once per loop iteration. The renderer decides whether a mode
/// is redrawn every cycle or only on entry.
pub trait ModeRenderer {
    /// Render `mode`
    ///
    /// - `just_entered`: true on the first cycle after a transition into `mode`
    /// - `reading`: the sensor reading gathered this cycle, possibly absent
    fn render(&mut self, mode: DisplayMode, just_entered: bool, reading: &SensorReading);
}

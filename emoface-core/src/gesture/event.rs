//! Gesture events produced by the recognizer

/// Result of one recognizer poll
///
/// Produced fresh every poll and consumed immediately; never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureEvent {
    /// Nothing recognized this poll
    #[default]
    None,
    /// One tap, confirmed after the double-tap window expired
    SingleTap,
    /// Two taps inside the double-tap window
    DoubleTap,
}

impl GestureEvent {
    /// Check if this poll produced a gesture
    pub fn is_gesture(&self) -> bool {
        !matches!(self, GestureEvent::None)
    }
}

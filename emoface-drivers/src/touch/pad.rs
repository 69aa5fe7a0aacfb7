//! Digital touch pad
//!
//! TTP223-style touch modules drive a plain logic level while touched.
//! Most boards are active-high; the solder-jumper variant is active-low.

use emoface_core::config::TouchConfig;
use emoface_core::traits::TouchInput;
use emoface_hal::InputPin;

/// Touch pad on a GPIO input
pub struct TouchPad<P> {
    pin: P,
    /// If true, touched = pin HIGH
    active_high: bool,
}

impl<P: InputPin> TouchPad<P> {
    /// Create a new touch pad
    ///
    /// # Arguments
    /// - `pin`: The GPIO input the module output is wired to
    /// - `active_high`: If false, the pad reads LOW while touched
    pub fn new(pin: P, active_high: bool) -> Self {
        Self { pin, active_high }
    }

    /// Create a touch pad from the device configuration
    pub fn from_config(pin: P, config: &TouchConfig) -> Self {
        Self::new(pin, config.active_high)
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> TouchInput for TouchPad<P> {
    fn is_touched(&mut self) -> bool {
        self.pin.is_high() == self.active_high
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct MockPin<'a>(&'a Cell<bool>);

    impl InputPin for MockPin<'_> {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_active_high() {
        let level = Cell::new(false);
        let mut pad = TouchPad::new(MockPin(&level), true);
        assert!(!pad.is_touched());
        level.set(true);
        assert!(pad.is_touched());
    }

    #[test]
    fn test_active_low() {
        let level = Cell::new(true);
        let mut pad = TouchPad::from_config(MockPin(&level), &TouchConfig { active_high: false });
        assert!(!pad.is_touched());
        level.set(false);
        assert!(pad.is_touched());
    }
}

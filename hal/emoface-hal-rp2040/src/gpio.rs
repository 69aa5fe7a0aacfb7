//! GPIO adapters for RP2040 pins

use core::convert::Infallible;

use embassy_rp::gpio::{Flex, Input, Pin, Pull};
use embassy_rp::Peri;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Touch pad output pin
///
/// Capacitive touch modules drive their output actively, so no pull is
/// applied by default.
pub struct TouchPin<'d> {
    input: Input<'d>,
}

impl<'d> TouchPin<'d> {
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self::with_pull(pin, Pull::None)
    }

    /// Use a pull resistor, for bare pads or mechanical switches
    pub fn with_pull(pin: Peri<'d, impl Pin>, pull: Pull) -> Self {
        Self {
            input: Input::new(pin, pull),
        }
    }
}

impl emoface_hal::InputPin for TouchPin<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}

/// Open-drain pin emulated on a bidirectional GPIO
///
/// Driving low switches the pin to an output at 0. Driving high releases
/// the line: the pin becomes an input and the pull-up (internal plus the
/// module's own) brings it high. Reading always samples the pad.
pub struct OpenDrainPin<'d> {
    flex: Flex<'d>,
}

impl<'d> OpenDrainPin<'d> {
    /// Create the pin in the released state
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        let mut flex = Flex::new(pin);
        flex.set_pull(Pull::Up);
        flex.set_low();
        flex.set_as_input();
        Self { flex }
    }
}

impl ErrorType for OpenDrainPin<'_> {
    type Error = Infallible;
}

impl InputPin for OpenDrainPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.flex.is_high())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.flex.is_low())
    }
}

impl OutputPin for OpenDrainPin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.flex.set_low();
        self.flex.set_as_output();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.flex.set_as_input();
        Ok(())
    }
}

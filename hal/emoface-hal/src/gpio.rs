//! GPIO pin abstractions
//!
//! The device only reads digital inputs through this layer; outputs are
//! driven by the chip HAL directly.

/// Digital input pin
///
/// Reads must return immediately. Implementations wrap the chip's input
/// register and never wait for an edge.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<T: InputPin + ?Sized> InputPin for &T {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPin(bool);

    impl InputPin for FixedPin {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_is_low_is_inverse_of_is_high() {
        assert!(FixedPin(false).is_low());
        assert!(!FixedPin(true).is_low());
    }

    #[test]
    fn test_reference_forwards() {
        let pin = FixedPin(true);
        let by_ref = &pin;
        assert!(by_ref.is_high());
    }
}

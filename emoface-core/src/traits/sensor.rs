//! Climate sensor trait

use crate::sensor::SensorReading;

/// Trait for temperature/humidity sensors
///
/// Implementations report failures as absent values in the returned
/// reading rather than as errors; callers decide what a partial reading
/// means to them.
pub trait ClimateSensor {
    /// Take a fresh reading
    ///
    /// Implementations must not return a cached value.
    fn read(&mut self) -> SensorReading;
}

impl<T: ClimateSensor + ?Sized> ClimateSensor for &mut T {
    fn read(&mut self) -> SensorReading {
        (**self).read()
    }
}

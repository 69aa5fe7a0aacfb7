//! Dashboard link traits

/// Whether the dashboard link is currently up
pub trait Connectivity {
    fn is_connected(&self) -> bool;
}

/// Fire-and-forget publisher for virtual dashboard channels
pub trait TelemetrySink {
    /// Publish a value on a channel
    ///
    /// There is no acknowledgment. A value that cannot be delivered is lost.
    fn publish(&mut self, channel: u8, value: f32);
}

impl<T: Connectivity + ?Sized> Connectivity for &T {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for &mut T {
    fn publish(&mut self, channel: u8, value: f32) {
        (**self).publish(channel, value)
    }
}

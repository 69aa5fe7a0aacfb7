//! Touch input trait

/// A single digital touch pad
pub trait TouchInput {
    /// Sample the pad. True while a finger is on it.
    ///
    /// Takes `&mut self` because some pads need a charge/measure cycle.
    fn is_touched(&mut self) -> bool;
}

impl<T: TouchInput + ?Sized> TouchInput for &mut T {
    fn is_touched(&mut self) -> bool {
        (**self).is_touched()
    }
}

//! Monotonic millisecond time
//!
//! The clock is a free-running `u32` millisecond counter that wraps roughly
//! every 49.7 days. Durations are always computed with [`elapsed`], which
//! uses wrapping subtraction so a comparison stays correct across the wrap.

/// Milliseconds since an arbitrary epoch (usually boot)
pub type Millis = u32;

/// Source of monotonic time, sampled once per loop iteration
pub trait MonotonicClock {
    /// Current time in milliseconds; wraps on overflow
    fn now_ms(&self) -> Millis;
}

/// Milliseconds elapsed from `since` to `now`, modulo 2^32
///
/// Valid as long as the real interval is shorter than one full wrap.
#[inline]
pub const fn elapsed(now: Millis, since: Millis) -> Millis {
    now.wrapping_sub(since)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_plain() {
        assert_eq!(elapsed(1_500, 1_000), 500);
        assert_eq!(elapsed(42, 42), 0);
    }

    #[test]
    fn test_elapsed_across_wrap() {
        let before = u32::MAX - 99;
        let after = 100;
        assert_eq!(elapsed(after, before), 200);
    }
}

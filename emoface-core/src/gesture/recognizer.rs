//! Debounced single/double tap recognizer
//!
//! The recognizer sees one raw touch sample per loop iteration and keeps just
//! enough state to tell a lone tap from a pair of taps:
//!
//! ```text
//!           accepted touch                      accepted touch, gap <= window
//!   Idle ──────────────────────▶ Awaiting ─────────────────────────────────▶ DoubleTap
//!    ▲                              │  │
//!    │      gap > window            │  │ accepted touch, gap > window
//!    └────── (SingleTap) ◀──────────┘  └──▶ restart window, stay Awaiting
//! ```
//!
//! Touch samples closer than the debounce interval to the last accepted
//! sample are dropped before any of this, so a finger resting on the pad
//! produces at most one accepted sample per debounce interval.

use super::event::GestureEvent;
use crate::config::TimingConfig;
use crate::{elapsed, Millis};

/// Internal recognizer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RecognizerState {
    /// Start of the current double-tap window
    pub last_event_at: Millis,
    /// A first tap was seen and its window is still open
    pub awaiting_second_tap: bool,
    /// Time of the last touch sample that passed the debounce filter
    ///
    /// `None` until the first touch after boot, which is never debounced.
    pub last_accepted_at: Option<Millis>,
}

/// Outcome of a single poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoll {
    /// The raw sample was a touch and passed the debounce filter
    pub accepted: bool,
    /// Gesture recognized on this poll
    pub event: GestureEvent,
}

/// Touch gesture recognizer
#[derive(Debug, Clone)]
pub struct TouchGestureRecognizer {
    state: RecognizerState,
    debounce_ms: Millis,
    window_ms: Millis,
}

impl Default for TouchGestureRecognizer {
    fn default() -> Self {
        Self::new(&TimingConfig::default())
    }
}

impl TouchGestureRecognizer {
    /// Create a recognizer using the debounce and double-tap timings
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            state: RecognizerState::default(),
            debounce_ms: timing.debounce_ms,
            window_ms: timing.double_tap_window_ms,
        }
    }

    /// Get the current internal state
    pub fn state(&self) -> &RecognizerState {
        &self.state
    }

    /// Check if a first tap is waiting for its partner
    pub fn is_awaiting_second_tap(&self) -> bool {
        self.state.awaiting_second_tap
    }

    /// Poll with the raw touch level
    ///
    /// `now` must be non-decreasing (modulo wrap) across calls. Call exactly
    /// once per loop iteration.
    pub fn poll(&mut self, touched: bool, now: Millis) -> GestureEvent {
        self.poll_touch(touched, now).event
    }

    /// Poll and also report whether the sample was an accepted touch
    pub fn poll_touch(&mut self, touched: bool, now: Millis) -> TouchPoll {
        let accepted = touched && !self.is_bouncing(now);
        let mut event = GestureEvent::None;

        if accepted {
            self.state.last_accepted_at = Some(now);

            if !self.state.awaiting_second_tap {
                self.state.awaiting_second_tap = true;
                self.state.last_event_at = now;
            } else if elapsed(now, self.state.last_event_at) <= self.window_ms {
                self.state.awaiting_second_tap = false;
                event = GestureEvent::DoubleTap;
            } else {
                // Window already closed: this touch opens a new one
                self.state.last_event_at = now;
            }
        }

        if self.state.awaiting_second_tap
            && elapsed(now, self.state.last_event_at) > self.window_ms
        {
            self.state.awaiting_second_tap = false;
            event = GestureEvent::SingleTap;
        }

        TouchPoll { accepted, event }
    }

    /// Drop any pending first tap without reporting it
    ///
    /// Debounce history is kept, so a bouncing finger still cannot re-arm
    /// the recognizer immediately.
    pub fn disarm(&mut self) {
        self.state.awaiting_second_tap = false;
    }

    fn is_bouncing(&self, now: Millis) -> bool {
        match self.state.last_accepted_at {
            Some(last) => elapsed(now, last) < self.debounce_ms,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Poll every `step` ms from `from` to `to` inclusive, touching at the
    /// listed instants, and collect the non-empty events with their time.
    fn run(
        recognizer: &mut TouchGestureRecognizer,
        touches: &[Millis],
        from: Millis,
        to: Millis,
        step: Millis,
    ) -> Vec<(Millis, GestureEvent)> {
        let mut events = Vec::new();
        let mut t = from;
        while t <= to {
            let event = recognizer.poll(touches.contains(&t), t);
            if event.is_gesture() {
                events.push((t, event));
            }
            t += step;
        }
        events
    }

    #[test]
    fn test_first_touch_after_boot_is_accepted() {
        let mut r = TouchGestureRecognizer::default();
        let poll = r.poll_touch(true, 100);
        assert!(poll.accepted);
        assert_eq!(poll.event, GestureEvent::None);
        assert!(r.is_awaiting_second_tap());
    }

    #[test]
    fn test_single_tap_after_window() {
        let mut r = TouchGestureRecognizer::default();
        assert_eq!(r.poll(true, 100), GestureEvent::None);
        assert_eq!(r.poll(false, 300), GestureEvent::None);
        // Exactly at the window edge is still inside the window
        assert_eq!(r.poll(false, 500), GestureEvent::None);
        assert_eq!(r.poll(false, 501), GestureEvent::SingleTap);
        assert!(!r.is_awaiting_second_tap());
        assert_eq!(r.poll(false, 2000), GestureEvent::None);
    }

    #[test]
    fn test_scenario_single_tap_reported_at_520() {
        let mut r = TouchGestureRecognizer::default();
        let events = run(&mut r, &[100], 0, 1000, 20);
        assert_eq!(events, [(520, GestureEvent::SingleTap)]);
    }

    #[test]
    fn test_double_tap() {
        let mut r = TouchGestureRecognizer::default();
        assert_eq!(r.poll(true, 100), GestureEvent::None);
        assert_eq!(r.poll(true, 300), GestureEvent::DoubleTap);
        assert!(!r.is_awaiting_second_tap());
        // No trailing single tap
        assert_eq!(r.poll(false, 1000), GestureEvent::None);
    }

    #[test]
    fn test_double_tap_inclusive_boundary() {
        let mut r = TouchGestureRecognizer::default();
        r.poll(true, 1000);
        assert_eq!(r.poll(true, 1400), GestureEvent::DoubleTap);
    }

    #[test]
    fn test_late_second_touch_restarts_window() {
        let mut r = TouchGestureRecognizer::default();
        r.poll(true, 1000);
        // No poll in between, so the window expiry was never observed
        let poll = r.poll_touch(true, 1401);
        assert!(poll.accepted);
        assert_eq!(poll.event, GestureEvent::None);
        assert!(r.is_awaiting_second_tap());
        assert_eq!(r.state().last_event_at, 1401);
        assert_eq!(r.poll(false, 1802), GestureEvent::SingleTap);
    }

    #[test]
    fn test_debounce_ignores_close_samples() {
        let mut r = TouchGestureRecognizer::default();
        assert!(r.poll_touch(true, 100).accepted);
        assert!(!r.poll_touch(true, 150).accepted);
        assert!(!r.poll_touch(true, 299).accepted);
        assert_eq!(r.state().last_accepted_at, Some(100));
        // 200 ms after the last accepted sample is no longer bouncing
        let poll = r.poll_touch(true, 300);
        assert!(poll.accepted);
        assert_eq!(poll.event, GestureEvent::DoubleTap);
    }

    #[test]
    fn test_held_finger_repeats_every_debounce_interval() {
        let mut r = TouchGestureRecognizer::default();
        // Finger held from 0 to 250: accepted at 0 and 200 only
        let mut accepted = Vec::new();
        for t in (0..=250).step_by(10) {
            if r.poll_touch(true, t).accepted {
                accepted.push(t);
            }
        }
        assert_eq!(accepted, [0, 200]);
    }

    #[test]
    fn test_disarm_drops_pending_tap() {
        let mut r = TouchGestureRecognizer::default();
        r.poll(true, 100);
        r.disarm();
        assert_eq!(r.poll(false, 1000), GestureEvent::None);
        // Debounce history survives disarm
        assert!(!r.poll_touch(true, 150).accepted);
    }

    #[test]
    fn test_wraparound() {
        let mut r = TouchGestureRecognizer::default();
        let start = u32::MAX - 150;
        r.poll(true, start);
        // 200 ms later, across the wrap
        assert_eq!(r.poll(true, start.wrapping_add(200)), GestureEvent::DoubleTap);

        let mut r = TouchGestureRecognizer::default();
        r.poll(true, start);
        assert_eq!(r.poll(false, start.wrapping_add(400)), GestureEvent::None);
        assert_eq!(r.poll(false, start.wrapping_add(401)), GestureEvent::SingleTap);
    }

    #[test]
    fn test_custom_timing() {
        let timing = TimingConfig::default().accelerated(10);
        let mut r = TouchGestureRecognizer::new(&timing);
        r.poll(true, 0);
        assert!(!r.poll_touch(true, 19).accepted);
        assert_eq!(r.poll(true, 20), GestureEvent::DoubleTap);
    }

    proptest! {
        #[test]
        fn prop_isolated_touch_is_one_single_tap(start in 0u32..1_000_000, silence in 401u32..5_000) {
            let mut r = TouchGestureRecognizer::default();
            let events = run(&mut r, &[start], start, start + silence, 1);
            prop_assert_eq!(events, vec![(start + 401, GestureEvent::SingleTap)]);
        }

        #[test]
        fn prop_close_pair_is_one_double_tap(start in 0u32..1_000_000, gap in 200u32..=400) {
            let mut r = TouchGestureRecognizer::default();
            let events = run(&mut r, &[start, start + gap], start, start + gap + 2_000, 1);
            prop_assert_eq!(events, vec![(start + gap, GestureEvent::DoubleTap)]);
        }

        #[test]
        fn prop_distant_pair_is_single_then_rearm(start in 0u32..1_000_000, gap in 401u32..3_000) {
            let mut r = TouchGestureRecognizer::default();
            let second = start + gap;
            let events = run(&mut r, &[start, second], start, second, 1);
            prop_assert_eq!(events, vec![(start + 401, GestureEvent::SingleTap)]);
            prop_assert!(r.is_awaiting_second_tap());
            prop_assert_eq!(r.state().last_event_at, second);
        }

        #[test]
        fn prop_bounce_is_ignored(start in 0u32..1_000_000, bounce in 1u32..200) {
            let mut r = TouchGestureRecognizer::default();
            r.poll(true, start);
            let before = *r.state();
            let poll = r.poll_touch(true, start + bounce);
            prop_assert!(!poll.accepted);
            prop_assert_eq!(poll.event, GestureEvent::None);
            prop_assert_eq!(*r.state(), before);
        }

        #[test]
        fn prop_never_both_events(samples in proptest::collection::vec(any::<bool>(), 1..400)) {
            let mut r = TouchGestureRecognizer::default();
            let mut singles = 0u32;
            let mut doubles = 0u32;
            let mut accepted = 0u32;
            for (i, touched) in samples.iter().enumerate() {
                let poll = r.poll_touch(*touched, i as u32 * 25);
                if poll.accepted {
                    accepted += 1;
                }
                match poll.event {
                    GestureEvent::SingleTap => singles += 1,
                    GestureEvent::DoubleTap => doubles += 1,
                    GestureEvent::None => {}
                }
            }
            // Every gesture consumes at least one accepted touch
            prop_assert!(singles + 2 * doubles <= accepted);
        }
    }
}

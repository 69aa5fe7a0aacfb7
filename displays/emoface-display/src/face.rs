//! Animated face
//!
//! Two large eyes drawn in the middle rows of the screen. The normal
//! expression blinks once per blink interval; the happy expression shows
//! upturned arcs and does not blink.

use emoface_hal::{elapsed, Millis};

use crate::screen::{Screen, SCREEN_ROWS};

/// How long the eyes stay shut during a blink
pub const BLINK_DURATION_MS: Millis = 150;

/// First row of the eye art
const EYE_ROW: usize = 2;

const EYES_OPEN: [&str; 3] = [
    "   .---.     .---.",
    "   | o |     | o |",
    "   '---'     '---'",
];

const EYES_SHUT: [&str; 3] = [
    "",
    "   -----     -----",
    "",
];

const EYES_HAPPY: [&str; 3] = [
    "",
    "    .-.       .-.",
    "   /   \\     /   \\",
];

/// Facial expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Expression {
    #[default]
    Normal,
    Happy,
}

/// Face animation state
#[derive(Debug, Clone)]
pub struct FaceAnimator {
    expression: Expression,
    blink_interval_ms: Millis,
    /// Start of the blink cycle, set on the first draw
    epoch: Option<Millis>,
}

impl FaceAnimator {
    /// Create a face that blinks every `blink_interval_ms` (0 = never)
    pub fn new(blink_interval_ms: Millis) -> Self {
        Self {
            expression: Expression::Normal,
            blink_interval_ms,
            epoch: None,
        }
    }

    pub fn expression(&self) -> Expression {
        self.expression
    }

    pub fn set_expression(&mut self, expression: Expression) {
        self.expression = expression;
    }

    /// Check if the eyes are shut at `now`
    ///
    /// A blink closes the last `BLINK_DURATION_MS` of each interval.
    pub fn is_blinking(&self, now: Millis) -> bool {
        let Some(epoch) = self.epoch else {
            return false;
        };
        if self.expression != Expression::Normal || self.blink_interval_ms <= BLINK_DURATION_MS {
            return false;
        }
        let phase = elapsed(now, epoch) % self.blink_interval_ms;
        phase >= self.blink_interval_ms - BLINK_DURATION_MS
    }

    /// Draw the face for time `now` into `screen`
    pub fn draw(&mut self, now: Millis, screen: &mut Screen) {
        self.epoch.get_or_insert(now);

        let art = match self.expression {
            Expression::Happy => &EYES_HAPPY,
            Expression::Normal if self.is_blinking(now) => &EYES_SHUT,
            Expression::Normal => &EYES_OPEN,
        };

        for row in 0..SCREEN_ROWS {
            let text = row
                .checked_sub(EYE_ROW)
                .and_then(|i| art.get(i))
                .copied()
                .unwrap_or("");
            screen.set_line(row, text);
        }
    }
}

//! Screen buffer
//!
//! A character grid matching the display module. Rows are tracked
//! individually so redrawing the same face every loop iteration only sends
//! the rows that actually changed.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};
use emoface_protocol::messages::{DISPLAY_COLS, DISPLAY_ROWS};

/// Number of character rows
pub const SCREEN_ROWS: usize = DISPLAY_ROWS as usize;

/// Number of character columns
pub const SCREEN_COLS: usize = DISPLAY_COLS as usize;

/// Text-mode screen buffer
#[derive(Clone)]
pub struct Screen {
    lines: [String<SCREEN_COLS>; SCREEN_ROWS],
    /// Bit `n` set = row `n` changed since the last flush
    dirty_rows: u8,
    /// Whole display must be cleared before rows are drawn
    needs_clear: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create an empty screen. The first flush clears the display.
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            dirty_rows: 0,
            needs_clear: true,
        }
    }

    /// Blank every row
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.dirty_rows = 0;
        self.needs_clear = true;
    }

    /// Replace a row, truncating to the screen width
    ///
    /// Rows outside the screen are ignored. The row is only marked dirty
    /// when its content changes.
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let text = truncate(text, SCREEN_COLS);
        if line.as_str() == text {
            return;
        }
        line.clear();
        let _ = line.push_str(text);
        self.dirty_rows |= 1 << row;
    }

    /// Replace a row with `text` centered in it
    pub fn set_centered(&mut self, row: usize, text: &str) {
        let text = truncate(text, SCREEN_COLS);
        let pad = (SCREEN_COLS - text.len()) / 2;
        let mut line = String::<SCREEN_COLS>::new();
        for _ in 0..pad {
            let _ = line.push(' ');
        }
        let _ = line.push_str(text);
        self.set_line(row, &line);
    }

    /// Get the content of a row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Get all lines in order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Check if anything needs to be sent to the display
    pub fn is_dirty(&self) -> bool {
        self.needs_clear || self.dirty_rows != 0
    }

    /// Force every row to be resent on the next flush
    pub fn mark_dirty(&mut self) {
        self.needs_clear = true;
        self.dirty_rows = 0;
        for (row, line) in self.lines.iter().enumerate() {
            if !line.is_empty() {
                self.dirty_rows |= 1 << row;
            }
        }
    }

    /// Send pending changes to `backend`
    ///
    /// Changed rows are padded to full width so they overwrite whatever was
    /// there before. On error the pending changes are kept for a retry.
    pub fn flush<B: DisplayBackend + ?Sized>(&mut self, backend: &mut B) -> Result<(), DisplayError> {
        if !self.is_dirty() {
            return Ok(());
        }

        if self.needs_clear {
            backend.clear()?;
            self.needs_clear = false;
        }

        for row in 0..SCREEN_ROWS {
            if self.dirty_rows & (1 << row) == 0 {
                continue;
            }
            let mut padded = self.lines[row].clone();
            while padded.push(' ').is_ok() {}
            backend.draw_text(row as u8, 0, &padded)?;
            self.dirty_rows &= !(1 << row);
        }

        backend.flush()
    }
}

/// Longest prefix of `text` that fits in `max` bytes on a char boundary
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

//! Display backend trait
//!
//! Defines the interface between the screen buffer and whatever shows it.

use embedded_io::Write;
use emoface_protocol::{ControllerMessage, FrameError, MAX_FRAME_SIZE};

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Command could not be encoded
    Encoding,
}

impl From<FrameError> for DisplayError {
    fn from(_: FrameError) -> Self {
        DisplayError::Encoding
    }
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for text rendering.
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: Text to display
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    fn flush(&mut self) -> Result<(), DisplayError>;
}

/// Backend for a display module on a serial link
///
/// Each call becomes one protocol frame written to `W`.
pub struct FrameBackend<W> {
    writer: W,
}

impl<W: Write> FrameBackend<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Release the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn send(&mut self, msg: &ControllerMessage<'_>) -> Result<(), DisplayError> {
        let frame = msg.to_frame()?;
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = frame.encode(&mut buf)?;
        self.writer
            .write_all(&buf[..len])
            .map_err(|_| DisplayError::Communication)
    }
}

impl<W: Write> DisplayBackend for FrameBackend<W> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.send(&ControllerMessage::Clear)
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.send(&ControllerMessage::Text { row, col, text })
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.writer.flush().map_err(|_| DisplayError::Communication)
    }
}

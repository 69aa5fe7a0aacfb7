//! Frame codec
//!
//! Encoding writes into a caller buffer or a fixed-capacity vector.
//! Decoding is a byte-at-a-time state machine so it can be fed straight
//! from a UART receive loop; garbage between frames is skipped until the
//! next START byte.

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 64;

/// START + LENGTH + TYPE + CHECKSUM
const OVERHEAD: usize = 4;

/// Largest encoded frame
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + OVERHEAD;

/// Errors that can occur while building, encoding or parsing frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds `MAX_PAYLOAD_SIZE`
    PayloadTooLarge,
    /// Declared length exceeds `MAX_PAYLOAD_SIZE`
    BadLength,
    /// Checksum mismatch
    BadChecksum,
    /// Frame type or payload does not match any message
    UnknownMessage,
    /// Output buffer too small
    BufferTooSmall,
}

/// XOR checksum over LENGTH, TYPE and payload
pub fn checksum(kind: u8, payload: &[u8]) -> u8 {
    payload
        .iter()
        .fold(payload.len() as u8 ^ kind, |acc, byte| acc ^ byte)
}

/// A single frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type
    pub kind: u8,
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    pub fn new(kind: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { kind, payload })
    }

    /// Frame with no payload
    pub fn bare(kind: u8) -> Self {
        Self {
            kind,
            payload: Vec::new(),
        }
    }

    /// Encoded length of this frame
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + OVERHEAD
    }

    /// Encode into `out`, returning the number of bytes written
    pub fn encode(&self, out: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        let out = out.get_mut(..len).ok_or(FrameError::BufferTooSmall)?;
        let (head, rest) = out.split_at_mut(3);
        let (body, tail) = rest.split_at_mut(self.payload.len());

        head.copy_from_slice(&[FRAME_START, self.payload.len() as u8, self.kind]);
        body.copy_from_slice(&self.payload);
        tail[0] = checksum(self.kind, &self.payload);
        Ok(len)
    }

    /// Encode into a fixed-capacity vector
    pub fn to_bytes(&self) -> Vec<u8, MAX_FRAME_SIZE> {
        let mut bytes = Vec::new();
        // Capacity covers the largest frame, so none of these can fail
        let _ = bytes.extend_from_slice(&[FRAME_START, self.payload.len() as u8, self.kind]);
        let _ = bytes.extend_from_slice(&self.payload);
        let _ = bytes.push(checksum(self.kind, &self.payload));
        bytes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Hunting for START
    Sync,
    Length,
    Kind,
    Payload,
    Checksum,
}

/// Incremental frame decoder
#[derive(Debug, Clone)]
pub struct FrameParser {
    stage: Stage,
    length: usize,
    kind: u8,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub const fn new() -> Self {
        Self {
            stage: Stage::Sync,
            length: 0,
            kind: 0,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame and wait for the next START
    pub fn reset(&mut self) {
        self.stage = Stage::Sync;
        self.length = 0;
        self.payload.clear();
    }

    /// Check if the parser is in the middle of a frame
    pub fn is_mid_frame(&self) -> bool {
        self.stage != Stage::Sync
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(frame))` on the CHECKSUM byte of a valid frame and
    /// `Ok(None)` while more bytes are needed. On error the partial frame
    /// is dropped and the parser resynchronizes on its own.
    pub fn push(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.stage {
            Stage::Sync => {
                if byte == FRAME_START {
                    self.stage = Stage::Length;
                }
            }
            Stage::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::BadLength);
                }
                self.length = byte as usize;
                self.stage = Stage::Kind;
            }
            Stage::Kind => {
                self.kind = byte;
                self.payload.clear();
                self.stage = if self.length == 0 {
                    Stage::Checksum
                } else {
                    Stage::Payload
                };
            }
            Stage::Payload => {
                // Length was bounded in Stage::Length
                let _ = self.payload.push(byte);
                if self.payload.len() == self.length {
                    self.stage = Stage::Checksum;
                }
            }
            Stage::Checksum => {
                let valid = byte == checksum(self.kind, &self.payload);
                let frame = Frame {
                    kind: self.kind,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                return if valid {
                    Ok(Some(frame))
                } else {
                    Err(FrameError::BadChecksum)
                };
            }
        }
        Ok(None)
    }

    /// Feed bytes until a frame completes
    ///
    /// Returns the frame and how many bytes were consumed, so the caller
    /// can continue with the remainder.
    pub fn push_slice(&mut self, bytes: &[u8]) -> (Result<Option<Frame>, FrameError>, usize) {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.push(byte) {
                Ok(None) => {}
                done => return (done, i + 1),
            }
        }
        (Ok(None), bytes.len())
    }
}

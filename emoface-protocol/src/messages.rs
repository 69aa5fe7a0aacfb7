//! Message types
//!
//! - Controller → peripherals: telemetry, heartbeat replies, screen commands
//! - Bridge → controller: heartbeat requests, dashboard link status

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use heapless::Vec;

// Message type IDs: Bridge → Controller
pub const MSG_PING: u8 = 0x02;
pub const MSG_LINK_STATUS: u8 = 0x03;

// Message type IDs: Controller → Display
pub const MSG_CLEAR: u8 = 0x20;
pub const MSG_TEXT: u8 = 0x21;

// Message type IDs: Controller → Bridge
pub const MSG_PONG: u8 = 0x24;
pub const MSG_TELEMETRY: u8 = 0x30;

/// Display text grid
pub const DISPLAY_ROWS: u8 = 8;
pub const DISPLAY_COLS: u8 = 21;

/// Messages sent by the controller
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerMessage<'a> {
    /// Publish a value on a dashboard channel
    Telemetry { channel: u8, value: f32 },
    /// Heartbeat response
    Pong,
    /// Clear the display
    Clear,
    /// Draw text at a grid position, clipped to the row
    Text { row: u8, col: u8, text: &'a str },
}

impl ControllerMessage<'_> {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            ControllerMessage::Telemetry { channel, value } => {
                // Payload: [channel][f32 little-endian]
                let v = value.to_le_bytes();
                Frame::new(MSG_TELEMETRY, &[*channel, v[0], v[1], v[2], v[3]])
            }
            ControllerMessage::Pong => Ok(Frame::bare(MSG_PONG)),
            ControllerMessage::Clear => Ok(Frame::bare(MSG_CLEAR)),
            ControllerMessage::Text { row, col, text } => {
                // Payload: [row][col][len][chars...]
                let room = (DISPLAY_COLS as usize).saturating_sub(*col as usize);
                let bytes = &text.as_bytes()[..text.len().min(room)];

                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload
                    .extend_from_slice(&[*row, *col, bytes.len() as u8])
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(bytes)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(MSG_TEXT, &payload)
            }
        }
    }
}

impl<'a> ControllerMessage<'a> {
    /// Parse a controller message (used by peripheral simulators and tests)
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        let p = &frame.payload;
        match (frame.kind, p.len()) {
            (MSG_TELEMETRY, 5) => Ok(ControllerMessage::Telemetry {
                channel: p[0],
                value: f32::from_le_bytes([p[1], p[2], p[3], p[4]]),
            }),
            (MSG_PONG, 0) => Ok(ControllerMessage::Pong),
            (MSG_CLEAR, 0) => Ok(ControllerMessage::Clear),
            (MSG_TEXT, n) if n >= 3 && n == 3 + p[2] as usize => {
                let text =
                    core::str::from_utf8(&p[3..]).map_err(|_| FrameError::UnknownMessage)?;
                Ok(ControllerMessage::Text {
                    row: p[0],
                    col: p[1],
                    text,
                })
            }
            _ => Err(FrameError::UnknownMessage),
        }
    }
}

/// Messages sent by the network bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeMessage {
    /// Heartbeat request
    Ping,
    /// Dashboard session state changed (or periodic restatement)
    LinkStatus { connected: bool },
}

impl BridgeMessage {
    /// Parse a bridge message from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match (frame.kind, frame.payload.as_slice()) {
            (MSG_PING, []) => Ok(BridgeMessage::Ping),
            (MSG_LINK_STATUS, [flag]) => Ok(BridgeMessage::LinkStatus {
                connected: *flag != 0,
            }),
            _ => Err(FrameError::UnknownMessage),
        }
    }

    /// Encode into a frame (for bridge simulators and tests)
    pub fn to_frame(&self) -> Frame {
        match self {
            BridgeMessage::Ping => Frame::bare(MSG_PING),
            BridgeMessage::LinkStatus { connected } => Frame {
                kind: MSG_LINK_STATUS,
                payload: Vec::from_iter([*connected as u8]),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telemetry_payload() {
        let frame = ControllerMessage::Telemetry {
            channel: 1,
            value: 56.0,
        }
        .to_frame()
        .unwrap();
        assert_eq!(frame.kind, MSG_TELEMETRY);
        assert_eq!(frame.payload[0], 1);
        assert_eq!(&frame.payload[1..], &56.0f32.to_le_bytes());
    }

    #[test]
    fn test_text_payload() {
        let frame = ControllerMessage::Text {
            row: 2,
            col: 4,
            text: "23.4 C",
        }
        .to_frame()
        .unwrap();
        assert_eq!(frame.kind, MSG_TEXT);
        assert_eq!(&frame.payload[..3], &[2, 4, 6]);
        assert_eq!(&frame.payload[3..], b"23.4 C");
    }

    #[test]
    fn test_text_clipped_to_row() {
        let frame = ControllerMessage::Text {
            row: 0,
            col: 18,
            text: "WEATHER",
        }
        .to_frame()
        .unwrap();
        assert_eq!(frame.payload[2], 3);
        assert_eq!(&frame.payload[3..], b"WEA");

        let off_screen = ControllerMessage::Text {
            row: 0,
            col: 30,
            text: "x",
        }
        .to_frame()
        .unwrap();
        assert_eq!(off_screen.payload[2], 0);
    }

    #[test]
    fn test_controller_message_parse() {
        let original = ControllerMessage::Text {
            row: 5,
            col: 0,
            text: "Sensor Error",
        };
        let frame = original.to_frame().unwrap();
        assert_eq!(ControllerMessage::from_frame(&frame), Ok(original));

        let frame = ControllerMessage::Telemetry {
            channel: 0,
            value: -3.5,
        }
        .to_frame()
        .unwrap();
        assert_eq!(
            ControllerMessage::from_frame(&frame),
            Ok(ControllerMessage::Telemetry {
                channel: 0,
                value: -3.5
            })
        );
    }

    #[test]
    fn test_bridge_messages() {
        assert_eq!(
            BridgeMessage::from_frame(&Frame::bare(MSG_PING)),
            Ok(BridgeMessage::Ping)
        );
        let up = Frame::new(MSG_LINK_STATUS, &[1]).unwrap();
        assert_eq!(
            BridgeMessage::from_frame(&up),
            Ok(BridgeMessage::LinkStatus { connected: true })
        );
        let down = BridgeMessage::LinkStatus { connected: false }.to_frame();
        assert_eq!(&down.payload[..], &[0]);
    }

    #[test]
    fn test_bridge_rejects_malformed() {
        assert_eq!(
            BridgeMessage::from_frame(&Frame::new(MSG_LINK_STATUS, &[]).unwrap()),
            Err(FrameError::UnknownMessage)
        );
        assert_eq!(
            BridgeMessage::from_frame(&Frame::bare(0x7F)),
            Err(FrameError::UnknownMessage)
        );
    }
}

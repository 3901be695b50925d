//! Packet framing, CRC-8 integrity, and the resynchronizing stream parser
//!
//! The surface streams packets over a lossy serial link; the parser is a
//! byte-at-a-time state machine that hunts for the SOF byte, so a corrupt
//! or truncated packet costs exactly one error and the stream recovers at
//! the next SOF.

use heapless::Vec;

use crate::events::{SurfaceEvent, TouchAction, TouchEvent, CODE_DOUBLE_TAP, CODE_MATRIX};
use crate::matrix::{DotMatrix, MATRIX_COLS, MATRIX_PAYLOAD_BYTES, MATRIX_ROWS};

/// Packet synchronization byte
pub const PACKET_START: u8 = 0xAA;

/// Touch packet size: SOF + code + x + y + id + CRC
pub const TOUCH_PACKET_SIZE: usize = 8;

/// Double-tap packet size: SOF + code + row + column + CRC
pub const TAP_PACKET_SIZE: usize = 5;

/// Matrix packet header size: SOF + code + rows + cols + payload length
pub const MATRIX_HEADER_SIZE: usize = 6;

/// Largest complete packet (a matrix packet)
pub const MAX_PACKET_SIZE: usize = MATRIX_HEADER_SIZE + MATRIX_PAYLOAD_BYTES + 1;

/// CRC-8, polynomial 0x07, initial value 0x00
///
/// Computed over every packet byte from SOF through the last payload byte.
pub fn crc8(bytes: &[u8]) -> u8 {
    let mut crc: u8 = 0;
    for &byte in bytes {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ 0x07;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// Errors that can occur during packet parsing or encoding
///
/// Every parse-side error is recoverable: the parser resets and the next
/// SOF byte resynchronizes the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Event code not known to this protocol version
    UnknownEventCode(u8),
    /// CRC mismatch
    InvalidChecksum,
    /// Matrix packet declared a shape other than 20×96
    DimensionMismatch {
        /// Declared row count
        rows: u8,
        /// Declared column count
        cols: u8,
    },
    /// Matrix payload length field disagrees with the fixed payload size
    PayloadLength,
    /// Buffer too small for encoding
    BufferTooSmall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Hunting for the SOF byte
    AwaitStart,
    /// Got SOF, waiting for the event code
    AwaitCode,
    /// Reading a fixed-size event body
    Body { remaining: u8 },
    /// Reading the matrix shape header
    MatrixHeader { remaining: u8 },
    /// Reading the bit-packed matrix payload
    MatrixPayload { remaining: u16 },
    /// Waiting for the CRC byte
    AwaitChecksum,
}

/// State machine for parsing the incoming packet stream
#[derive(Debug, Clone)]
pub struct PacketParser {
    state: ParseState,
    buffer: Vec<u8, MAX_PACKET_SIZE>,
}

impl Default for PacketParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketParser {
    /// Create a new packet parser
    pub fn new() -> Self {
        Self {
            state: ParseState::AwaitStart,
            buffer: Vec::new(),
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::AwaitStart;
        self.buffer.clear();
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(event))` when a complete valid packet is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on a parse error.
    /// After an error the parser has already reset itself.
    pub fn feed(&mut self, byte: u8) -> Result<Option<SurfaceEvent>, PacketError> {
        match self.state {
            ParseState::AwaitStart => {
                if byte == PACKET_START {
                    self.buffer.clear();
                    let _ = self.buffer.push(byte);
                    self.state = ParseState::AwaitCode;
                }
                // Silently ignore inter-packet noise
                Ok(None)
            }
            ParseState::AwaitCode => {
                let _ = self.buffer.push(byte);
                if TouchAction::from_code(byte).is_some() {
                    self.state = ParseState::Body { remaining: 5 };
                } else if byte == CODE_DOUBLE_TAP {
                    self.state = ParseState::Body { remaining: 2 };
                } else if byte == CODE_MATRIX {
                    self.state = ParseState::MatrixHeader { remaining: 4 };
                } else {
                    self.reset();
                    return Err(PacketError::UnknownEventCode(byte));
                }
                Ok(None)
            }
            ParseState::Body { remaining } => {
                let _ = self.buffer.push(byte);
                if remaining == 1 {
                    self.state = ParseState::AwaitChecksum;
                } else {
                    self.state = ParseState::Body {
                        remaining: remaining - 1,
                    };
                }
                Ok(None)
            }
            ParseState::MatrixHeader { remaining } => {
                let _ = self.buffer.push(byte);
                if remaining > 1 {
                    self.state = ParseState::MatrixHeader {
                        remaining: remaining - 1,
                    };
                    return Ok(None);
                }

                // Shape is validated before any payload byte is accepted,
                // so a malformed matrix can never replace a good one.
                let rows = self.buffer[2];
                let cols = self.buffer[3];
                let declared = u16::from_le_bytes([self.buffer[4], self.buffer[5]]);
                if rows as usize != MATRIX_ROWS || cols as usize != MATRIX_COLS {
                    self.reset();
                    return Err(PacketError::DimensionMismatch { rows, cols });
                }
                if declared as usize != MATRIX_PAYLOAD_BYTES {
                    self.reset();
                    return Err(PacketError::PayloadLength);
                }
                self.state = ParseState::MatrixPayload {
                    remaining: MATRIX_PAYLOAD_BYTES as u16,
                };
                Ok(None)
            }
            ParseState::MatrixPayload { remaining } => {
                // Cannot overflow: capacity covers the largest packet
                let _ = self.buffer.push(byte);
                if remaining == 1 {
                    self.state = ParseState::AwaitChecksum;
                } else {
                    self.state = ParseState::MatrixPayload {
                        remaining: remaining - 1,
                    };
                }
                Ok(None)
            }
            ParseState::AwaitChecksum => {
                let expected = crc8(&self.buffer);
                if byte != expected {
                    self.reset();
                    return Err(PacketError::InvalidChecksum);
                }

                let event = decode_body(&self.buffer);
                self.reset();
                event.map(Some)
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete event found, if any. Remaining bytes
    /// after a complete packet are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<SurfaceEvent>, PacketError> {
        for &byte in bytes {
            if let Some(event) = self.feed(byte)? {
                return Ok(Some(event));
            }
        }
        Ok(None)
    }
}

/// Decode a CRC-verified packet body into an event
fn decode_body(buffer: &[u8]) -> Result<SurfaceEvent, PacketError> {
    let code = buffer[1];
    if let Some(action) = TouchAction::from_code(code) {
        return Ok(SurfaceEvent::Touch(TouchEvent {
            id: buffer[6],
            action,
            x: u16::from_le_bytes([buffer[2], buffer[3]]),
            y: u16::from_le_bytes([buffer[4], buffer[5]]),
            gesture: None,
        }));
    }
    match code {
        CODE_DOUBLE_TAP => Ok(SurfaceEvent::DoubleTap {
            row: buffer[2],
            column: buffer[3],
        }),
        CODE_MATRIX => {
            let matrix = DotMatrix::from_payload(&buffer[MATRIX_HEADER_SIZE..])?;
            Ok(SurfaceEvent::Matrix(matrix))
        }
        _ => Err(PacketError::UnknownEventCode(code)),
    }
}

impl SurfaceEvent {
    /// Encode this event into a byte buffer
    ///
    /// Returns the number of bytes written. Gesture labels are host-side
    /// annotations and are not part of the wire format; a decoded touch
    /// event therefore always carries `gesture: None`.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, PacketError> {
        match self {
            SurfaceEvent::Touch(touch) => {
                if buffer.len() < TOUCH_PACKET_SIZE {
                    return Err(PacketError::BufferTooSmall);
                }
                buffer[0] = PACKET_START;
                buffer[1] = touch.action.to_code();
                buffer[2..4].copy_from_slice(&touch.x.to_le_bytes());
                buffer[4..6].copy_from_slice(&touch.y.to_le_bytes());
                buffer[6] = touch.id;
                buffer[7] = crc8(&buffer[..7]);
                Ok(TOUCH_PACKET_SIZE)
            }
            SurfaceEvent::DoubleTap { row, column } => {
                if buffer.len() < TAP_PACKET_SIZE {
                    return Err(PacketError::BufferTooSmall);
                }
                buffer[0] = PACKET_START;
                buffer[1] = CODE_DOUBLE_TAP;
                buffer[2] = *row;
                buffer[3] = *column;
                buffer[4] = crc8(&buffer[..4]);
                Ok(TAP_PACKET_SIZE)
            }
            SurfaceEvent::Matrix(matrix) => {
                if buffer.len() < MAX_PACKET_SIZE {
                    return Err(PacketError::BufferTooSmall);
                }
                buffer[0] = PACKET_START;
                buffer[1] = CODE_MATRIX;
                buffer[2] = MATRIX_ROWS as u8;
                buffer[3] = MATRIX_COLS as u8;
                buffer[4..6].copy_from_slice(&(MATRIX_PAYLOAD_BYTES as u16).to_le_bytes());
                matrix.write_payload(&mut buffer[MATRIX_HEADER_SIZE..])?;
                let body_len = MATRIX_HEADER_SIZE + MATRIX_PAYLOAD_BYTES;
                buffer[body_len] = crc8(&buffer[..body_len]);
                Ok(MAX_PACKET_SIZE)
            }
        }
    }

    /// Encode this event into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_PACKET_SIZE>, PacketError> {
        let mut buffer = [0u8; MAX_PACKET_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| PacketError::BufferTooSmall)?;
        Ok(vec)
    }
}

//! Serial link protocol for the Tactus touch surface
//!
//! This crate defines the packet format spoken by the touch-sensitive
//! dot-matrix surface over its serial link. The device reports finger
//! activity, double taps, and full refreshes of its 20×96 dot bitmap;
//! the host only listens.
//!
//! # Packet format
//!
//! Every packet starts with a synchronization byte and ends with a CRC-8
//! (polynomial 0x07) computed over all preceding bytes, SOF included:
//!
//! ```text
//! Touch (8 bytes)
//! ┌──────┬──────┬─────────┬─────────┬────┬─────┐
//! │ 0xAA │ CODE │ X (LE)  │ Y (LE)  │ ID │ CRC │
//! │ 1B   │ 1B   │ 2B      │ 2B      │ 1B │ 1B  │
//! └──────┴──────┴─────────┴─────────┴────┴─────┘
//!
//! Matrix (247 bytes)
//! ┌──────┬──────┬──────┬──────┬──────────┬─────────┬─────┐
//! │ 0xAA │ 0x04 │ ROWS │ COLS │ LEN (LE) │ PAYLOAD │ CRC │
//! │ 1B   │ 1B   │ 1B   │ 1B   │ 2B       │ 240B    │ 1B  │
//! └──────┴──────┴──────┴──────┴──────────┴─────────┴─────┘
//!
//! Double tap (5 bytes)
//! ┌──────┬──────┬─────┬─────┬─────┐
//! │ 0xAA │ 0x05 │ ROW │ COL │ CRC │
//! └──────┴──────┴─────┴─────┴─────┘
//! ```
//!
//! The matrix payload is bit-packed MSB first, 12 bytes per row. A matrix
//! packet whose declared shape is not 20×96 is rejected before it can
//! reach any state downstream.

#![no_std]
#![deny(unsafe_code)]

pub mod events;
pub mod matrix;
pub mod packet;

pub use events::{Gesture, SurfaceEvent, TouchAction, TouchEvent};
pub use matrix::{DotMatrix, MATRIX_COLS, MATRIX_PAYLOAD_BYTES, MATRIX_ROWS};
pub use packet::{crc8, PacketError, PacketParser, MAX_PACKET_SIZE, PACKET_START};

//! Input-state synchronization and render-cache engine for the Tactus
//! surface visualizer
//!
//! This crate turns the event stream decoded by `tactus-protocol` into a
//! correctly composited frame on every render tick. It owns:
//!
//! - The authoritative session state: dot bitmap, active touch contacts,
//!   decaying double-tap highlights ([`Panel`])
//! - Gesture classification from contact movement history
//! - Geometry and color configuration
//! - The per-tick compositing sequence with a dirty-cached background
//!   layer ([`Compositor`])
//!
//! # Driver contract
//!
//! The core holds no event loop, clock, or transport. An external driver
//! owns both and makes two kinds of plain synchronous calls:
//!
//! - [`Panel::route`] once per decoded event, as events arrive
//! - [`Compositor::compose`] once per render tick, at a fixed rate
//!
//! Both run on one execution context; every event routed between two
//! ticks is fully applied before the next composite, so a frame always
//! reflects complete mutations. Decode failures stay at the protocol
//! boundary: the driver logs the `PacketError` and keeps the last
//! known-good frame rendering.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod gesture;
pub mod panel;
pub mod render;
pub mod state;
pub mod traits;

pub use panel::Panel;
pub use render::Compositor;
pub use traits::{RenderError, RenderSurface};

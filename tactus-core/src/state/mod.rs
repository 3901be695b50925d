//! Authoritative session state
//!
//! Three sibling components with no cross-references: the dot bitmap,
//! the active touch contacts, and the decaying double-tap highlights.
//! The compositor is their sole consumer.

pub mod contacts;
pub mod grid;
pub mod highlights;

pub use contacts::{Contact, ContactTable, MAX_CONTACTS};
pub use grid::GridBuffer;
pub use highlights::{HighlightMarker, HighlightSet, HIGHLIGHT_DECAY, HIGHLIGHT_LIFE};

//! Active touch contact table

use heapless::FnvIndexMap;
use tactus_protocol::{Gesture, TouchAction, TouchEvent};

use crate::config::geometry::{map_touch_x, map_touch_y};
use crate::config::{Palette, Rgb};

/// Maximum simultaneously tracked contacts
///
/// The wire id is a u8, but simultaneous fingers are physically bounded.
/// A Down event beyond this capacity is dropped.
pub const MAX_CONTACTS: usize = 16;

/// One actively tracked touch point, in render-space coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Contact {
    /// Render-space x
    pub x: f32,
    /// Render-space y
    pub y: f32,
    /// Last classified gesture, if any
    pub gesture: Option<Gesture>,
    /// Resolved display color
    pub color: Rgb,
}

impl Contact {
    fn from_event(event: &TouchEvent, palette: &Palette) -> Self {
        Self {
            x: map_touch_x(event.x),
            y: map_touch_y(event.y),
            gesture: event.gesture,
            color: palette.contact_color(event.gesture),
        }
    }
}

/// The set of live contacts, keyed by device-assigned identifier
///
/// At most one live contact exists per identifier. Events for unknown
/// identifiers are deliberate no-ops: with unordered, at-most-once
/// delivery a Move or Up may refer to a contact whose Down was lost or
/// whose Up already arrived.
#[derive(Debug, Clone, Default)]
pub struct ContactTable {
    contacts: FnvIndexMap<u8, Contact, MAX_CONTACTS>,
}

impl ContactTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one touch lifecycle event
    pub fn apply(&mut self, event: &TouchEvent, palette: &Palette) {
        match event.action {
            TouchAction::Down => {
                // Overwrites any live contact with the same id: a second
                // Down means the device reused the id, so it is a fresh
                // contact, not a merge. A full table drops the event.
                let _ = self.contacts.insert(event.id, Contact::from_event(event, palette));
            }
            TouchAction::Move => {
                if let Some(contact) = self.contacts.get_mut(&event.id) {
                    *contact = Contact::from_event(event, palette);
                }
            }
            TouchAction::Up => {
                self.contacts.remove(&event.id);
            }
        }
    }

    /// Whether a contact with this id is live
    pub fn contains(&self, id: u8) -> bool {
        self.contacts.contains_key(&id)
    }

    /// Look up a live contact
    pub fn get(&self, id: u8) -> Option<&Contact> {
        self.contacts.get(&id)
    }

    /// Number of live contacts
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether no contact is live
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Snapshot of all live contacts for the compositor
    ///
    /// Iteration order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Contact)> {
        self.contacts.iter().map(|(id, contact)| (*id, contact))
    }
}

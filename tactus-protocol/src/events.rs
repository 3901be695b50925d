//! Typed events reported by the touch surface

use crate::matrix::DotMatrix;

// Wire format event codes
const CODE_TOUCH_DOWN: u8 = 0x01;
const CODE_TOUCH_UP: u8 = 0x02;
const CODE_TOUCH_MOVE: u8 = 0x03;

/// Wire code for a full matrix refresh packet
pub const CODE_MATRIX: u8 = 0x04;

/// Wire code for a double-tap packet
pub const CODE_DOUBLE_TAP: u8 = 0x05;

/// Lifecycle phase of a touch contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchAction {
    /// Finger made contact with the surface
    Down,
    /// Finger lifted off the surface
    Up,
    /// Finger moved while in contact
    Move,
}

impl TouchAction {
    /// Parse an action from its wire format code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            CODE_TOUCH_DOWN => Some(TouchAction::Down),
            CODE_TOUCH_UP => Some(TouchAction::Up),
            CODE_TOUCH_MOVE => Some(TouchAction::Move),
            _ => None,
        }
    }

    /// Convert to wire format code
    pub fn to_code(self) -> u8 {
        match self {
            TouchAction::Down => CODE_TOUCH_DOWN,
            TouchAction::Up => CODE_TOUCH_UP,
            TouchAction::Move => CODE_TOUCH_MOVE,
        }
    }
}

/// Movement pattern classified from a contact's recent path
///
/// Gestures are classified host-side from the sample history of a contact;
/// the wire never carries them. Their only consumer is the display color
/// lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Small vertical oscillation on one spot (re-reading a character)
    Scrubbing,
    /// Forward then backward motion along a line (re-reading a word)
    Regression,
}

impl Gesture {
    /// Parse a gesture from its transport label
    ///
    /// Unrecognized labels map to `None`, which resolves to the default
    /// display color downstream.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "scrubbing" => Some(Gesture::Scrubbing),
            "regression" => Some(Gesture::Regression),
            _ => None,
        }
    }

    /// Transport label for this gesture
    pub fn label(self) -> &'static str {
        match self {
            Gesture::Scrubbing => "scrubbing",
            Gesture::Regression => "regression",
        }
    }
}

/// A single touch contact report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchEvent {
    /// Device-assigned contact identifier, unique while the contact lives
    pub id: u8,
    /// Lifecycle phase this report describes
    pub action: TouchAction,
    /// Horizontal position in device coordinates (0..=1600)
    pub x: u16,
    /// Vertical position in device coordinates (0..=350)
    pub y: u16,
    /// Gesture label, if one has been classified for this contact
    pub gesture: Option<Gesture>,
}

/// One decoded report from the surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Full replacement of the dot bitmap
    Matrix(DotMatrix),
    /// Touch contact lifecycle report
    Touch(TouchEvent),
    /// Double tap on one braille cell, in coarse cell coordinates
    DoubleTap {
        /// Braille row of the tapped cell
        row: u8,
        /// Braille column of the tapped cell
        column: u8,
    },
}

impl SurfaceEvent {
    /// Returns true if this event mutates the dot bitmap
    pub fn is_matrix(&self) -> bool {
        matches!(self, SurfaceEvent::Matrix(_))
    }

    /// Returns true if this event reports contact activity
    pub fn is_touch(&self) -> bool {
        matches!(self, SurfaceEvent::Touch(_))
    }
}

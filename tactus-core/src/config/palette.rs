//! Display colors
//!
//! Gesture labels exist only to pick a contact's display color. The
//! lookup is a total function with a guaranteed default entry, so an
//! absent or unrecognized gesture can never produce a missing color.

use tactus_protocol::Gesture;

/// An RGB color in the render surface's color space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from channel values
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Color assignments for one visualization session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Palette {
    /// Contacts classified as scrubbing
    pub scrubbing: Rgb,
    /// Contacts classified as regression
    pub regression: Rgb,
    /// Contacts with no (or an unrecognized) gesture
    pub contact_default: Rgb,
    /// Double-tap highlight markers
    pub highlight: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            scrubbing: Rgb::new(255, 165, 0),
            regression: Rgb::new(64, 156, 255),
            contact_default: Rgb::new(255, 255, 255),
            highlight: Rgb::new(255, 200, 0),
        }
    }
}

impl Palette {
    /// Resolve the display color for a contact
    pub fn contact_color(&self, gesture: Option<Gesture>) -> Rgb {
        match gesture {
            Some(Gesture::Scrubbing) => self.scrubbing,
            Some(Gesture::Regression) => self.regression,
            None => self.contact_default,
        }
    }
}

//! Event routing into the session state

use tactus_protocol::{SurfaceEvent, TouchAction, TouchEvent};

use crate::config::Palette;
use crate::gesture::GestureDetector;
use crate::state::{ContactTable, GridBuffer, HighlightSet};

/// Authoritative state for one visualization session
///
/// Owns the three state components and the gesture detector; constructed
/// once per session, so independent sessions (and tests) never share
/// state. [`Panel::route`] is the single inbound entry point: each event
/// is dispatched synchronously and independently, with no buffering.
///
/// Routing is infallible by construction — envelope validation (unknown
/// event codes, missing fields, wrong matrix shape) happens at the
/// protocol boundary, and stale contact references are deliberate no-ops
/// inside the contact table.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    pub(crate) grid: GridBuffer,
    pub(crate) contacts: ContactTable,
    pub(crate) highlights: HighlightSet,
    pub(crate) detector: GestureDetector,
    pub(crate) palette: Palette,
}

impl Panel {
    /// Create a session with the default palette
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a custom palette
    pub fn with_palette(palette: Palette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    /// Route one decoded event to its owning component
    ///
    /// `now_ms` is the driver's clock, used only for gesture history
    /// windowing.
    pub fn route(&mut self, event: SurfaceEvent, now_ms: u32) {
        match event {
            SurfaceEvent::Matrix(matrix) => self.grid.replace(matrix),
            SurfaceEvent::Touch(touch) => self.route_touch(touch, now_ms),
            SurfaceEvent::DoubleTap { row, column } => self.highlights.spawn_block(row, column),
        }
    }

    fn route_touch(&mut self, mut touch: TouchEvent, now_ms: u32) {
        match touch.action {
            TouchAction::Down | TouchAction::Move => {
                let detected = self.detector.update(touch.id, touch.x, touch.y, now_ms);
                // A transport-supplied label wins over local detection
                if touch.gesture.is_none() {
                    touch.gesture = detected;
                }
                self.contacts.apply(&touch, &self.palette);
            }
            TouchAction::Up => {
                self.detector.release(touch.id);
                self.contacts.apply(&touch, &self.palette);
            }
        }
    }

    /// The dot bitmap buffer
    pub fn grid(&self) -> &GridBuffer {
        &self.grid
    }

    /// The live contact table
    pub fn contacts(&self) -> &ContactTable {
        &self.contacts
    }

    /// The live highlight markers
    pub fn highlights(&self) -> &HighlightSet {
        &self.highlights
    }

    /// The session palette
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

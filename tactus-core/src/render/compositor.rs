//! Per-tick frame composition
//!
//! The background (the full dot grid) is expensive to draw but changes
//! far less often than the tick rate, so it lives on a cached layer that
//! is rebuilt only when the grid buffer is dirty. Highlights and
//! contacts are cheap and drawn fresh every frame.

use tactus_protocol::{MATRIX_COLS, MATRIX_ROWS};

use crate::config::geometry::{is_gap_col, is_gap_row};
use crate::config::CellGeometry;
use crate::panel::Panel;
use crate::traits::{RenderError, RenderSurface};

/// Fixed-order frame compositor
///
/// One instance per session; holds the cell geometry and nothing else.
/// [`Compositor::compose`] is the per-tick entry point and is the only
/// place highlight lifetimes advance, so tick rate and decay stay in
/// lockstep.
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    geometry: CellGeometry,
}

impl Compositor {
    /// Create a compositor for the fixed virtual space
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose one frame
    ///
    /// Runs the fixed sequence: rebuild the cached background if the
    /// grid is dirty, blit it, advance and draw highlights in decay
    /// order, draw contacts on top.
    pub fn compose<S: RenderSurface>(
        &self,
        panel: &mut Panel,
        surface: &mut S,
    ) -> Result<(), RenderError> {
        if panel.grid.is_dirty() {
            self.rebuild_background(panel, surface)?;
            panel.grid.mark_clean();
        }
        surface.blit_background()?;

        panel.highlights.tick();
        let highlight = panel.palette.highlight;
        for marker in panel.highlights.iter() {
            let (x, y) = self
                .geometry
                .cell_origin(marker.y_idx as usize, marker.x_idx as usize);
            surface.fill_cell(
                x,
                y,
                self.geometry.cell_w,
                self.geometry.cell_h,
                highlight,
                marker.opacity(),
            )?;
        }

        for (_, contact) in panel.contacts.iter() {
            surface.draw_contact(contact.x, contact.y, contact.color)?;
        }

        Ok(())
    }

    /// Redraw every physical dot cell onto the background layer
    fn rebuild_background<S: RenderSurface>(
        &self,
        panel: &Panel,
        surface: &mut S,
    ) -> Result<(), RenderError> {
        surface.begin_background()?;
        for row in 0..MATRIX_ROWS {
            if is_gap_row(row) {
                continue;
            }
            for col in 0..MATRIX_COLS {
                if is_gap_col(col) {
                    continue;
                }
                let (x, y) = self.geometry.cell_origin(row, col);
                surface.draw_cell(
                    x,
                    y,
                    self.geometry.cell_w,
                    self.geometry.cell_h,
                    panel.grid.matrix().get(row, col),
                )?;
            }
        }
        surface.end_background()
    }
}

//! Render-space geometry
//!
//! Everything is expressed in a fixed virtual coordinate space; window
//! sizing, scaling, and letterboxing belong to the `RenderSurface`
//! implementor.

use tactus_protocol::{MATRIX_COLS, MATRIX_ROWS};

/// Virtual render space width
pub const VIRTUAL_WIDTH: f32 = 1600.0;

/// Virtual render space height
pub const VIRTUAL_HEIGHT: f32 = 350.0;

/// Padding around the dot grid, in virtual units
pub const PADDING: f32 = 50.0;

/// Maximum x reported by the touch surface
pub const TOUCH_X_MAX: f32 = 1600.0;

/// Maximum y reported by the touch surface
pub const TOUCH_Y_MAX: f32 = 350.0;

/// Map a touch x coordinate into render space
///
/// Linear map from [0, 1600] to [PADDING/2, VIRTUAL_WIDTH - PADDING/2].
pub fn map_touch_x(raw: u16) -> f32 {
    let span = VIRTUAL_WIDTH - PADDING;
    PADDING / 2.0 + f32::from(raw) / TOUCH_X_MAX * span
}

/// Map a touch y coordinate into render space
///
/// Linear map from [0, 350] to [PADDING/2, VIRTUAL_HEIGHT - PADDING/2].
pub fn map_touch_y(raw: u16) -> f32 {
    let span = VIRTUAL_HEIGHT - PADDING;
    PADDING / 2.0 + f32::from(raw) / TOUCH_Y_MAX * span
}

/// Whether a dot row is a non-physical gap
///
/// The surface is 4 braille rows of 4 dots each, separated by one blank
/// row: every 5th row is a gap.
pub fn is_gap_row(row: usize) -> bool {
    row % 5 == 4
}

/// Whether a dot column is a non-physical gap
///
/// 32 braille columns of 2 dots each, separated by one blank column:
/// every 3rd column is a gap.
pub fn is_gap_col(col: usize) -> bool {
    col % 3 == 2
}

/// Placement of the dot grid in render space
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CellGeometry {
    /// Width of one dot cell
    pub cell_w: f32,
    /// Height of one dot cell
    pub cell_h: f32,
    /// x of the grid's top-left corner
    pub origin_x: f32,
    /// y of the grid's top-left corner
    pub origin_y: f32,
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl CellGeometry {
    /// Geometry for the fixed virtual space
    pub fn new() -> Self {
        Self {
            cell_w: (VIRTUAL_WIDTH - PADDING) / MATRIX_COLS as f32,
            cell_h: (VIRTUAL_HEIGHT - PADDING) / MATRIX_ROWS as f32,
            origin_x: PADDING / 2.0,
            origin_y: PADDING / 2.0,
        }
    }

    /// Top-left corner of one dot cell in render space
    pub fn cell_origin(&self, row: usize, col: usize) -> (f32, f32) {
        (
            self.origin_x + col as f32 * self.cell_w,
            self.origin_y + row as f32 * self.cell_h,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_x_endpoints() {
        assert_eq!(map_touch_x(0), 25.0);
        assert_eq!(map_touch_x(1600), 1575.0);
        assert_eq!(map_touch_x(800), 800.0);
    }

    #[test]
    fn test_touch_y_endpoints() {
        assert_eq!(map_touch_y(0), 25.0);
        assert_eq!(map_touch_y(350), 325.0);
        assert_eq!(map_touch_y(175), 175.0);
    }

    #[test]
    fn test_gap_rows() {
        let gaps: usize = (0..MATRIX_ROWS).filter(|&r| is_gap_row(r)).count();
        assert_eq!(gaps, 4);
        assert!(is_gap_row(4));
        assert!(is_gap_row(19));
        assert!(!is_gap_row(0));
        assert!(!is_gap_row(3));
    }

    #[test]
    fn test_gap_cols() {
        let gaps: usize = (0..MATRIX_COLS).filter(|&c| is_gap_col(c)).count();
        assert_eq!(gaps, 32);
        assert!(is_gap_col(2));
        assert!(is_gap_col(95));
        assert!(!is_gap_col(0));
        assert!(!is_gap_col(1));
    }

    #[test]
    fn test_cell_geometry() {
        let geometry = CellGeometry::new();
        assert_eq!(geometry.cell_h, 15.0);
        assert_eq!(geometry.origin_x, 25.0);
        assert_eq!(geometry.origin_y, 25.0);

        let (x, y) = geometry.cell_origin(0, 0);
        assert_eq!((x, y), (25.0, 25.0));

        let (x, y) = geometry.cell_origin(2, 0);
        assert_eq!((x, y), (25.0, 55.0));
    }
}

//! Transient double-tap highlight markers

use heapless::Vec;
use tactus_protocol::{MATRIX_COLS, MATRIX_ROWS};

/// Initial life of a freshly spawned marker, in ticks of decay budget
pub const HIGHLIGHT_LIFE: i16 = 300;

/// Life subtracted per render tick
pub const HIGHLIGHT_DECAY: i16 = 3;

/// Opacity of a freshly spawned marker
pub const HIGHLIGHT_MAX_OPACITY: i16 = 200;

/// Dot rows per braille row (4 dots + 1 gap)
pub const BLOCK_ROW_SCALE: usize = 5;

/// Dot columns per braille column (2 dots + 1 gap)
pub const BLOCK_COL_SCALE: usize = 3;

/// Dot rows lit by one tap (the height of a braille cell)
pub const BLOCK_ROWS: usize = 4;

/// Dot columns lit by one tap (the width of a braille cell)
pub const BLOCK_COLS: usize = 2;

/// Maximum simultaneously live markers (16 whole tap blocks)
pub const MAX_HIGHLIGHTS: usize = 128;

/// One decaying highlight on a single dot cell
///
/// Markers have no identity: duplicates at the same coordinate coexist
/// and decay independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HighlightMarker {
    /// Dot column index
    pub x_idx: u8,
    /// Dot row index
    pub y_idx: u8,
    /// Remaining life; never observed at or below zero
    pub life: i16,
}

impl HighlightMarker {
    /// Render opacity, a linear map from life in [0, 300] to [0, 200]
    pub fn opacity(&self) -> u8 {
        let life = self.life.clamp(0, HIGHLIGHT_LIFE) as i32;
        (life * HIGHLIGHT_MAX_OPACITY as i32 / HIGHLIGHT_LIFE as i32) as u8
    }
}

/// The set of live highlight markers
#[derive(Debug, Clone, Default)]
pub struct HighlightSet {
    markers: Vec<HighlightMarker, MAX_HIGHLIGHTS>,
}

impl HighlightSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the fixed block of markers for one double tap
    ///
    /// A tap lands on a braille cell; its coarse (row, column) expands to
    /// the cell's 2×4 block of dot coordinates: rows `row*5 .. row*5+4`,
    /// columns `column*3 .. column*3+2`. Coordinates outside the dot grid
    /// are skipped; markers beyond capacity are dropped.
    pub fn spawn_block(&mut self, row: u8, column: u8) {
        let base_row = row as usize * BLOCK_ROW_SCALE;
        let base_col = column as usize * BLOCK_COL_SCALE;

        for y_idx in base_row..base_row + BLOCK_ROWS {
            for x_idx in base_col..base_col + BLOCK_COLS {
                if y_idx >= MATRIX_ROWS || x_idx >= MATRIX_COLS {
                    continue;
                }
                let _ = self.markers.push(HighlightMarker {
                    x_idx: x_idx as u8,
                    y_idx: y_idx as u8,
                    life: HIGHLIGHT_LIFE,
                });
            }
        }
    }

    /// Advance every marker by one tick
    ///
    /// Decay and expiry are atomic: a marker whose life crosses to zero
    /// or below is removed in the same tick, so it never renders with
    /// non-positive life.
    pub fn tick(&mut self) {
        for marker in &mut self.markers {
            marker.life -= HIGHLIGHT_DECAY;
        }
        self.markers.retain(|marker| marker.life > 0);
    }

    /// Number of live markers
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether no marker is live
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Snapshot of live markers for the compositor
    pub fn iter(&self) -> impl Iterator<Item = &HighlightMarker> {
        self.markers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_block_coordinates() {
        let mut set = HighlightSet::new();
        set.spawn_block(2, 1);

        // row 2 -> dot rows 10..=13, column 1 -> dot columns 3..=4
        assert_eq!(set.len(), 8);
        for y_idx in 10..=13u8 {
            for x_idx in 3..=4u8 {
                assert!(
                    set.iter().any(|m| m.x_idx == x_idx && m.y_idx == y_idx && m.life == HIGHLIGHT_LIFE),
                    "missing marker at ({x_idx}, {y_idx})"
                );
            }
        }
    }

    #[test]
    fn test_markers_expire_after_one_hundred_ticks() {
        let mut set = HighlightSet::new();
        set.spawn_block(0, 0);

        for _ in 0..99 {
            set.tick();
        }
        assert_eq!(set.len(), 8);
        assert!(set.iter().all(|m| m.life == 3));

        set.tick();
        assert!(set.is_empty());
    }

    #[test]
    fn test_life_is_monotonically_non_increasing() {
        let mut set = HighlightSet::new();
        set.spawn_block(1, 1);

        let mut previous = HIGHLIGHT_LIFE;
        for _ in 0..30 {
            set.tick();
            let life = set.iter().next().unwrap().life;
            assert!(life < previous);
            previous = life;
        }
    }

    #[test]
    fn test_opacity_map() {
        let marker = |life| HighlightMarker { x_idx: 0, y_idx: 0, life };
        assert_eq!(marker(300).opacity(), 200);
        assert_eq!(marker(150).opacity(), 100);
        assert_eq!(marker(3).opacity(), 2);
        assert_eq!(marker(0).opacity(), 0);
    }

    #[test]
    fn test_duplicate_markers_are_independent() {
        let mut set = HighlightSet::new();
        set.spawn_block(0, 0);
        set.tick();
        set.spawn_block(0, 0);

        assert_eq!(set.len(), 16);
        let at_origin: heapless::Vec<i16, 4> = set
            .iter()
            .filter(|m| m.x_idx == 0 && m.y_idx == 0)
            .map(|m| m.life)
            .collect();
        assert_eq!(at_origin.len(), 2);
        assert!(at_origin.contains(&(HIGHLIGHT_LIFE - HIGHLIGHT_DECAY)));
        assert!(at_origin.contains(&HIGHLIGHT_LIFE));
    }

    #[test]
    fn test_out_of_grid_block_is_skipped() {
        let mut set = HighlightSet::new();
        // Braille row 4 starts at dot row 20, past the last dot row
        set.spawn_block(4, 0);
        assert!(set.is_empty());

        // Braille row 3 is the last full block
        set.spawn_block(3, 31);
        assert_eq!(set.len(), 8);
        assert!(set.iter().all(|m| m.y_idx >= 15 && m.y_idx <= 18));
        assert!(set.iter().all(|m| m.x_idx == 93 || m.x_idx == 94));
    }

    #[test]
    fn test_capacity_overflow_drops_markers() {
        let mut set = HighlightSet::new();
        for _ in 0..20 {
            set.spawn_block(0, 0);
        }
        assert_eq!(set.len(), MAX_HIGHLIGHTS);
    }
}

//! Dot bitmap buffer with render-cache invalidation

use tactus_protocol::DotMatrix;

/// Owner of the current dot bitmap
///
/// Replacement is the only mutation and is atomic: a new full matrix
/// overwrites the old one, never a partial merge. Malformed payloads are
/// rejected at the protocol boundary, so every `DotMatrix` that reaches
/// this buffer already has the declared 20×96 shape.
///
/// The dirty flag tells the compositor that its cached background layer
/// no longer matches the bitmap.
#[derive(Debug, Clone)]
pub struct GridBuffer {
    matrix: DotMatrix,
    dirty: bool,
}

impl Default for GridBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl GridBuffer {
    /// Create an all-dark buffer
    ///
    /// Starts dirty so the first composite paints the background.
    pub fn new() -> Self {
        Self {
            matrix: DotMatrix::new(),
            dirty: true,
        }
    }

    /// Replace the whole bitmap and invalidate the cached background
    pub fn replace(&mut self, matrix: DotMatrix) {
        self.matrix = matrix;
        self.dirty = true;
    }

    /// Read access for the compositor
    pub fn matrix(&self) -> &DotMatrix {
        &self.matrix
    }

    /// Whether the cached background layer needs a rebuild
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the cached background layer as matching the bitmap
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

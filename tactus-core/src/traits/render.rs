//! Render surface trait

use crate::config::Rgb;

/// Errors that can occur while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Communication error with the drawing backend
    Communication,
    /// Coordinates outside the surface
    InvalidCoordinates,
    /// Surface not ready to draw
    NotReady,
}

/// Trait for the external drawing surface
///
/// All coordinates are in the fixed virtual render space (1600×350);
/// the implementor owns window sizing, scaling, and letterboxing.
///
/// The surface maintains one cached background layer. The compositor
/// rebuilds it (between `begin_background` and `end_background`) only
/// when the dot bitmap changed, and blits it as the base of every frame.
pub trait RenderSurface {
    /// Start rebuilding the cached background layer
    fn begin_background(&mut self) -> Result<(), RenderError>;

    /// Draw one dot cell onto the background layer
    ///
    /// `lit` selects the on/off appearance; both are drawn so the layer
    /// fully overwrites its previous content.
    fn draw_cell(&mut self, x: f32, y: f32, width: f32, height: f32, lit: bool)
        -> Result<(), RenderError>;

    /// Finish the background layer rebuild
    fn end_background(&mut self) -> Result<(), RenderError>;

    /// Blit the cached background layer as the frame's base
    fn blit_background(&mut self) -> Result<(), RenderError>;

    /// Fill one cell on the frame with a translucent color
    ///
    /// Used for highlight markers; `opacity` is 0 (invisible) to 255.
    fn fill_cell(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
        opacity: u8,
    ) -> Result<(), RenderError>;

    /// Draw a contact cursor on the frame
    fn draw_contact(&mut self, x: f32, y: f32, color: Rgb) -> Result<(), RenderError>;
}

//! Geometry and color configuration

pub mod geometry;
pub mod palette;

pub use geometry::CellGeometry;
pub use palette::{Palette, Rgb};

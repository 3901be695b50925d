//! External collaborator traits
//!
//! The core draws through an abstract surface; windowing, scaling, and
//! the actual drawing primitives live behind this boundary.

pub mod render;

pub use render::{RenderError, RenderSurface};

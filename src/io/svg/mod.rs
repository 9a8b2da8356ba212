//! SVG format writing operations for visualization export.

mod color;
mod geometry;
mod writer;

pub use color::*;
pub use geometry::*;
pub use writer::*;

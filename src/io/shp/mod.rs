//! Shapefile format reading operations.

mod polygon;
mod read;

pub(crate) use polygon::*;
pub use read::*;

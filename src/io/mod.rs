//! Format-specific reading and writing operations.
//!
//! - `csv` - electoral vote table in, metric table out
//! - `shp` - state boundary shapefiles
//! - `svg` - choropleth figure output

pub mod csv;
pub mod shp;
pub mod svg;

pub use csv::*;
pub use shp::{read_boundaries, StateBoundary};

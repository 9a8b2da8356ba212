//! Spatial join of metrics onto state boundaries and choropleth rendering.

mod classify;
mod join;
mod proj;
mod render;

pub use classify::*;
pub use join::*;
pub use proj::*;
pub use render::*;

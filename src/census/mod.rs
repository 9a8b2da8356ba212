//! Population-by-state table from the census data API.

mod client;
mod parse;

pub use client::*;
pub use parse::*;

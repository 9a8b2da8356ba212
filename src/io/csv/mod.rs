//! CSV format reading and writing operations.

mod read;
mod write;

pub use read::{read_electoral_csv, read_electoral_csv_str};
pub use write::{write_metrics_csv, write_metrics_csv_to, write_metrics_json_to};

//! Error kinds raised by the pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, joining or rendering state data.
#[derive(Debug, Error)]
pub enum Error {
    /// Population request failed after every attempt.
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// An input table or file does not have the expected shape.
    #[error("Schema error in {origin}: {message}")]
    Schema { origin: String, message: String },

    /// A join that feeds rendering produced no rows.
    #[error("Join mismatch: {message}")]
    JoinMismatch { message: String },

    /// A required input file is absent.
    #[error("Missing file: {}", .path.display())]
    MissingFile { path: PathBuf },

    /// A matched state reports zero population, so its vote weight is undefined.
    #[error("State {name:?} has zero population; vote weight is undefined")]
    ZeroPopulation { name: String },

    #[error("Table error: {0}")]
    Table(#[from] polars::error::PolarsError),

    #[error("Shapefile error: {0}")]
    Shapefile(#[from] shapefile::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn schema(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema { origin: origin.into(), message: message.into() }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

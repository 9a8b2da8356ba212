//! CSV reading operations.

use std::{fs::File, io::Cursor, path::Path};

use log::info;
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReader, DataType}};

use crate::{error::{Error, Result}, metrics::ElectoralRecord};

pub(crate) const NAME_COLUMN: &str = "NAME";
pub(crate) const VOTES_COLUMN: &str = "NUM_VOTES";

/// Reads a CSV file from `path` into a Polars DataFrame.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(Error::MissingFile { path: path.to_path_buf() });
    }
    let file = File::open(path)?;
    Ok(CsvReader::new(file).finish()?)
}

/// Reads a CSV from a string.
pub(crate) fn read_csv_string(csv: &str) -> Result<DataFrame> {
    Ok(CsvReader::new(Cursor::new(csv.as_bytes())).finish()?)
}

/// Extract electoral records from a frame with `NAME` and `NUM_VOTES` columns.
/// Other columns are ignored.
pub(crate) fn electoral_records(df: &DataFrame, origin: &str) -> Result<Vec<ElectoralRecord>> {
    let column = |name: &str| df.column(name)
        .map_err(|_| Error::schema(origin, format!("missing column {name:?}")));

    let names = column(NAME_COLUMN)?.cast(&DataType::String)?;
    let votes = column(VOTES_COLUMN)?.cast(&DataType::Float64)?;

    names.str()?.into_iter()
        .zip(votes.f64()?.into_iter())
        .enumerate()
        .map(|(i, (name, votes))| {
            let row = i + 1;
            let name = name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| Error::schema(origin, format!("row {row}: empty {NAME_COLUMN}")))?;
            let num_votes = votes
                .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0)
                .ok_or_else(|| Error::schema(origin, format!("row {row} ({name}): {VOTES_COLUMN} is not a non-negative integer")))?;
            Ok(ElectoralRecord::new(name, num_votes as u64))
        })
        .collect()
}

/// Read the electoral vote table from a CSV file.
pub fn read_electoral_csv(path: &Path) -> Result<Vec<ElectoralRecord>> {
    let df = read_csv(path)?;
    let records = electoral_records(&df, &path.display().to_string())?;
    info!("[io::csv] {} electoral rows from {}", records.len(), path.display());
    Ok(records)
}

/// Read the electoral vote table from CSV text.
pub fn read_electoral_csv_str(csv: &str) -> Result<Vec<ElectoralRecord>> {
    electoral_records(&read_csv_string(csv)?, "electoral CSV")
}

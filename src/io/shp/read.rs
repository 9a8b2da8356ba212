//! Shapefile reading operations.

use std::path::Path;

use geo::MultiPolygon;
use log::{info, warn};
use shapefile::{dbase::{FieldValue, Record}, Reader, Shape};

use crate::error::{Error, Result};

use super::shp_to_geo;

/// Attribute holding the state name.
pub const NAME_FIELD: &str = "NAME";

/// Boundary of one state, keyed by the shapefile's `NAME` attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct StateBoundary {
    pub name: String,
    pub shape: MultiPolygon<f64>,
}

/// The `.shp` file and the sidecars the reader needs alongside it.
fn require_shapefile_set(path: &Path) -> Result<()> {
    for required in [path.to_path_buf(), path.with_extension("shx"), path.with_extension("dbf")] {
        if !required.is_file() {
            return Err(Error::MissingFile { path: required });
        }
    }
    Ok(())
}

/// Trimmed, non-empty text from a character or memo attribute.
pub(crate) fn field_text(value: Option<&FieldValue>) -> Option<String> {
    let text = match value? {
        FieldValue::Character(Some(s)) => s.as_str(),
        FieldValue::Memo(s) => s.as_str(),
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn boundary_from_item(shape: Shape, record: &Record, index: usize, origin: &str) -> Result<Option<StateBoundary>> {
    let name = field_text(record.get(NAME_FIELD))
        .ok_or_else(|| Error::schema(origin, format!("record {index} has no {NAME_FIELD} attribute")))?;

    match shape {
        Shape::Polygon(polygon) => Ok(Some(StateBoundary { name, shape: shp_to_geo(&polygon) })),
        Shape::NullShape => {
            warn!("[io::shp] {name}: null shape skipped");
            Ok(None)
        }
        other => Err(Error::schema(origin, format!("{name}: expected a polygon, found {:?}", other.shapetype()))),
    }
}

/// Read every state boundary from a `.shp` file (with its `.shx` and `.dbf`).
pub fn read_boundaries(path: &Path) -> Result<Vec<StateBoundary>> {
    require_shapefile_set(path)?;
    let origin = path.display().to_string();

    let mut reader = Reader::from_path(path)?;
    let mut boundaries = Vec::new();
    for (index, item) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) = item?;
        if let Some(boundary) = boundary_from_item(shape, &record, index, &origin)? {
            boundaries.push(boundary);
        }
    }

    info!("[io::shp] {} boundaries from {}", boundaries.len(), path.display());
    Ok(boundaries)
}

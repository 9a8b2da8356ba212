//! Census API table decoding.
//!
//! The API answers with a JSON array of arrays. The first row is the header
//! and every following row holds string cells, e.g.
//! `[["NAME","P1_001N","state"],["Alabama","5024279","01"],...]`.

use serde_json::Value;

use crate::{error::{Error, Result}, metrics::PopulationRecord};

/// Header of the state name column.
pub const NAME_COLUMN: &str = "NAME";

/// Header of the total population column (renamed `POP` downstream).
pub const POPULATION_COLUMN: &str = "P1_001N";

const ORIGIN: &str = "census response";

fn column_index(header: &[Value], column: &str) -> Result<usize> {
    header.iter()
        .position(|cell| cell.as_str() == Some(column))
        .ok_or_else(|| Error::schema(ORIGIN, format!("header has no {column:?} column")))
}

/// Parse a population cell, accepting both `"5024279"` and `5024279`.
fn parse_population_cell(cell: &Value, row: usize) -> Result<u64> {
    let parsed = match cell {
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    };
    parsed.ok_or_else(|| Error::schema(ORIGIN, format!("row {row}: {POPULATION_COLUMN} value {cell} is not a non-negative integer")))
}

/// Decode the census array-of-arrays into population records, in response order.
pub fn parse_population(body: &Value) -> Result<Vec<PopulationRecord>> {
    let rows = body.as_array()
        .ok_or_else(|| Error::schema(ORIGIN, "expected a JSON array of rows"))?;

    let (header, data) = rows.split_first()
        .ok_or_else(|| Error::schema(ORIGIN, "response is empty"))?;
    let header = header.as_array()
        .ok_or_else(|| Error::schema(ORIGIN, "header row is not an array"))?;

    let name_idx = column_index(header, NAME_COLUMN)?;
    let pop_idx = column_index(header, POPULATION_COLUMN)?;

    data.iter().enumerate()
        .map(|(i, row)| {
            let row_number = i + 1;
            let cells = row.as_array()
                .ok_or_else(|| Error::schema(ORIGIN, format!("row {row_number} is not an array")))?;
            if cells.len() != header.len() {
                return Err(Error::schema(ORIGIN, format!("row {row_number} has {} cells, header has {}", cells.len(), header.len())));
            }
            let name = cells[name_idx].as_str()
                .ok_or_else(|| Error::schema(ORIGIN, format!("row {row_number}: {NAME_COLUMN} is not a string")))?;
            let population = parse_population_cell(&cells[pop_idx], row_number)?;
            Ok(PopulationRecord::new(name, population))
        })
        .collect()
}

/// Parse a raw response body.
pub fn parse_population_str(body: &str) -> Result<Vec<PopulationRecord>> {
    let value: Value = serde_json::from_str(body)?;
    parse_population(&value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_census_rows_in_order() {
        let body = r#"[["NAME","P1_001N","state"],
                       ["Pennsylvania","13002700","42"],
                       ["California","39538223","06"],
                       ["Wyoming","576851","56"]]"#;
        let records = parse_population_str(body).unwrap();
        assert_eq!(records, vec![
            PopulationRecord::new("Pennsylvania", 13_002_700),
            PopulationRecord::new("California", 39_538_223),
            PopulationRecord::new("Wyoming", 576_851),
        ]);
    }

    #[test]
    fn columns_located_by_header() {
        let body = json!([["state", "P1_001N", "NAME"], ["11", "689545", "District of Columbia"]]);
        let records = parse_population(&body).unwrap();
        assert_eq!(records, vec![PopulationRecord::new("District of Columbia", 689_545)]);
    }

    #[test]
    fn numeric_cells_accepted() {
        let body = json!([["NAME", "P1_001N"], ["Vermont", 643077]]);
        assert_eq!(parse_population(&body).unwrap()[0].population, 643_077);
    }

    #[test]
    fn header_only_yields_no_rows() {
        let body = json!([["NAME", "P1_001N", "state"]]);
        assert!(parse_population(&body).unwrap().is_empty());
    }

    #[test]
    fn missing_population_column() {
        let body = json!([["NAME", "state"], ["Ohio", "39"]]);
        assert!(matches!(parse_population(&body), Err(Error::Schema { .. })));
    }

    #[test]
    fn non_integer_population() {
        for cell in [json!("12.5"), json!("-4"), json!("n/a"), json!(null)] {
            let body = json!([["NAME", "P1_001N"], ["Ohio", cell]]);
            assert!(matches!(parse_population(&body), Err(Error::Schema { .. })));
        }
    }

    #[test]
    fn ragged_row() {
        let body = json!([["NAME", "P1_001N", "state"], ["Ohio", "11799448"]]);
        assert!(matches!(parse_population(&body), Err(Error::Schema { .. })));
    }

    #[test]
    fn not_an_array() {
        assert!(matches!(parse_population(&json!({"error": "bad key"})), Err(Error::Schema { .. })));
        assert!(matches!(parse_population(&json!([])), Err(Error::Schema { .. })));
        assert!(matches!(parse_population_str("<html>"), Err(Error::Json(_))));
    }
}

//! CSV writing operations.

use std::{fs::File, io::Write, path::Path};

use polars::{frame::DataFrame, io::SerWriter, prelude::{Column, CsvWriter, NamedFrom}, series::Series};

use crate::{error::Result, metrics::MetricTable};

/// Build a DataFrame with the metric table's columns, in row order.
/// `FAIR_NUM_VOTES` and `VOTE_DELTA` are present only when computed.
pub(crate) fn metrics_frame(table: &MetricTable) -> Result<DataFrame> {
    let rows = &table.rows;
    let mut columns: Vec<Column> = vec![
        Series::new("NAME".into(), rows.iter().map(|r| r.name.clone()).collect::<Vec<_>>()).into(),
        Series::new("POP".into(), rows.iter().map(|r| r.population).collect::<Vec<_>>()).into(),
        Series::new("NUM_VOTES".into(), rows.iter().map(|r| r.num_votes).collect::<Vec<_>>()).into(),
        Series::new("VOTE_WEIGHT".into(), rows.iter().map(|r| r.vote_weight).collect::<Vec<_>>()).into(),
    ];

    if rows.iter().all(|r| r.fair_num_votes.is_some()) && !rows.is_empty() {
        columns.push(Series::new("FAIR_NUM_VOTES".into(), rows.iter().map(|r| r.fair_num_votes).collect::<Vec<_>>()).into());
        columns.push(Series::new("VOTE_DELTA".into(), rows.iter().map(|r| r.vote_delta).collect::<Vec<_>>()).into());
    }

    Ok(DataFrame::new(columns)?)
}

/// Write a DataFrame as CSV to any writer.
pub(crate) fn write_csv_to<W: Write>(df: &mut DataFrame, writer: W) -> Result<()> {
    CsvWriter::new(writer).finish(df)?;
    Ok(())
}

/// Write the metric table to a CSV file.
pub fn write_metrics_csv(table: &MetricTable, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv_to(&mut metrics_frame(table)?, file)
}

/// Write the metric table as CSV to any writer (e.g. stdout).
pub fn write_metrics_csv_to<W: Write>(table: &MetricTable, writer: W) -> Result<()> {
    write_csv_to(&mut metrics_frame(table)?, writer)
}

/// Write the metric table as a JSON array of row objects.
pub fn write_metrics_json_to<W: Write>(table: &MetricTable, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, &table.rows)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Variant, metrics::{compute_metrics, ElectoralRecord, PopulationRecord}};

    fn table(variant: Variant) -> MetricTable {
        compute_metrics(
            &[PopulationRecord::new("A", 100), PopulationRecord::new("B", 50)],
            &[ElectoralRecord::new("A", 3), ElectoralRecord::new("B", 3)],
            variant,
        ).unwrap()
    }

    #[test]
    fn frame_columns_follow_variant() {
        let weight = metrics_frame(&table(Variant::Weight)).unwrap();
        let names = weight.get_column_names().iter().map(|name| name.to_string()).collect::<Vec<_>>();
        assert_eq!(names, ["NAME", "POP", "NUM_VOTES", "VOTE_WEIGHT"]);

        let delta = metrics_frame(&table(Variant::Delta)).unwrap();
        assert_eq!(delta.width(), 6);
        assert_eq!(delta.height(), 2);
    }

    #[test]
    fn csv_header_and_row_order() {
        let mut out = Vec::new();
        write_metrics_csv_to(&table(Variant::Weight), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("NAME,POP,NUM_VOTES,VOTE_WEIGHT"));
        assert!(lines.next().unwrap().starts_with("B,50,3,"));
        assert!(lines.next().unwrap().starts_with("A,100,3,"));
    }

    #[test]
    fn csv_round_trips_through_reader() {
        let mut out = Vec::new();
        write_metrics_csv_to(&table(Variant::Delta), &mut out).unwrap();
        let records = crate::io::read_electoral_csv_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(records, vec![ElectoralRecord::new("B", 3), ElectoralRecord::new("A", 3)]);
    }

    #[test]
    fn json_rows_use_column_names() {
        let mut out = Vec::new();
        write_metrics_json_to(&table(Variant::Delta), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["NAME"], "B");
        assert_eq!(value[0]["NUM_VOTES"], 3);
        assert!((value[0]["VOTE_DELTA"].as_f64().unwrap() - 1.0).abs() < 1e-9);

        let mut out = Vec::new();
        write_metrics_json_to(&table(Variant::Weight), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value[0].get("VOTE_DELTA").is_none());
    }
}

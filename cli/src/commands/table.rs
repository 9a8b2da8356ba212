use std::{fs::File, io::{self, BufWriter, Write}};

use anyhow::{Context, Result};
use voteweight::{load_metrics, write_metrics_csv_to, write_metrics_json_to, MetricTable};

use crate::cli::{Cli, TableArgs, TableFormat};

fn write_table(table: &MetricTable, format: TableFormat, writer: impl Write) -> voteweight::Result<()> {
    match format {
        TableFormat::Csv => write_metrics_csv_to(table, writer),
        TableFormat::Json => write_metrics_json_to(table, writer),
    }
}

pub fn run(_cli: &Cli, args: &TableArgs) -> Result<()> {
    let source = super::census_client(&args.source)?;
    let table = load_metrics(&source, &args.source.votes, args.source.variant.into())
        .context("Failed to compute vote weight table")?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_table(&table, args.format, &mut writer)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_table(&table, args.format, &mut writer).context("Failed to write table to stdout")?;
            writer.flush()?;
        }
    }
    Ok(())
}

//! End-to-end run: fetch, join, derive, sort, spatial join, render.
//!
//! Every input is loaded and joined before the first file is written, so a
//! failure in any stage leaves no partial figures behind.

use std::path::{Path, PathBuf};

use log::info;

use crate::{
    census::PopulationSource,
    config::{PipelineConfig, RenderConfig, Variant},
    error::{Error, Result},
    io::{read_boundaries, read_electoral_csv, write_metrics_csv, StateBoundary},
    map::{figures_for, render_figure_to_string, spatial_join, write_figure, MappedState},
    metrics::{compute_metrics, ElectoralRecord, MetricTable, PopulationRecord},
};

/// Joined metric table and the states ready to draw.
#[derive(Clone, Debug)]
pub struct Prepared {
    pub table: MetricTable,
    pub states: Vec<MappedState>,
}

/// Files written by [`run`].
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub table: MetricTable,
    pub figures: Vec<PathBuf>,
    pub table_file: Option<PathBuf>,
}

/// Fetch population and read electoral votes, then compute the metric table.
pub fn load_metrics(source: &dyn PopulationSource, votes_path: &Path, variant: Variant) -> Result<MetricTable> {
    let population = source.fetch_population()?;
    let electoral = read_electoral_csv(votes_path)?;
    compute_metrics(&population, &electoral, variant)
}

/// Join the in-memory inputs; fails if either join leaves nothing to draw.
pub fn prepare(population: &[PopulationRecord], electoral: &[ElectoralRecord], boundaries: Vec<StateBoundary>, variant: Variant) -> Result<Prepared> {
    let table = compute_metrics(population, electoral, variant)?;
    prepare_table(table, boundaries)
}

fn prepare_table(table: MetricTable, boundaries: Vec<StateBoundary>) -> Result<Prepared> {
    if table.is_empty() {
        return Err(Error::JoinMismatch { message: "no state name is shared by the population and electoral tables".to_string() });
    }
    let states = spatial_join(&table.rows, boundaries);
    if states.is_empty() {
        return Err(Error::JoinMismatch { message: "no boundary NAME matches a state in the metric table".to_string() });
    }
    Ok(Prepared { table, states })
}

/// Write the metric table (if requested) and every figure for the variant.
///
/// All figures are rendered in memory first; a rendering failure writes nothing.
pub fn write_outputs(prepared: &Prepared, output_dir: &Path, table_path: Option<&Path>, render: &RenderConfig) -> Result<(Vec<PathBuf>, Option<PathBuf>)> {
    let figures = figures_for(prepared.table.variant, render.classes);
    let documents = figures.iter()
        .map(|figure| render_figure_to_string(figure, &prepared.states, render))
        .collect::<Result<Vec<_>>>()?;

    let table_file = match table_path {
        Some(path) => {
            write_metrics_csv(&prepared.table, path)?;
            info!("[pipeline] wrote {}", path.display());
            Some(path.to_path_buf())
        }
        None => None,
    };

    let paths = figures.iter().zip(&documents)
        .map(|(figure, document)| write_figure(output_dir, figure, document))
        .collect::<Result<Vec<_>>>()?;

    Ok((paths, table_file))
}

/// Run the whole pipeline with the given population source.
pub fn run(config: &PipelineConfig, source: &dyn PopulationSource) -> Result<PipelineOutput> {
    let table = load_metrics(source, &config.votes_path, config.variant)?;
    let boundaries = read_boundaries(&config.boundaries_path)?;
    let prepared = prepare_table(table, boundaries)?;
    info!("[pipeline] {} states on the map", prepared.states.len());

    let (figures, table_file) = write_outputs(&prepared, &config.output_dir, config.table_path.as_deref(), &config.render)?;
    Ok(PipelineOutput { table: prepared.table, figures, table_file })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::census::StaticPopulation;
    use geo::polygon;

    #[test]
    fn missing_votes_file_aborts_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            votes_path: dir.path().join("statevotes.csv"),
            output_dir: dir.path().join("out"),
            ..PipelineConfig::default()
        };
        let source = StaticPopulation(vec![PopulationRecord::new("Iowa", 3_190_369)]);
        assert!(matches!(run(&config, &source), Err(Error::MissingFile { .. })));
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn missing_boundaries_abort_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let votes = dir.path().join("statevotes.csv");
        let mut file = std::fs::File::create(&votes).unwrap();
        writeln!(file, "NAME,NUM_VOTES\nIowa,6").unwrap();

        let config = PipelineConfig {
            votes_path: votes,
            boundaries_path: dir.path().join("US_State_Boundaries.shp"),
            output_dir: dir.path().join("out"),
            table_path: Some(dir.path().join("table.csv")),
            ..PipelineConfig::default()
        };
        let source = StaticPopulation(vec![PopulationRecord::new("Iowa", 3_190_369)]);
        assert!(matches!(run(&config, &source), Err(Error::MissingFile { .. })));
        assert!(!dir.path().join("table.csv").exists());
    }

    #[test]
    fn undrawable_boundaries_write_neither_table_nor_figures() {
        let flat = StateBoundary {
            name: "Iowa".to_string(),
            shape: geo::MultiPolygon(vec![geo::polygon![(x: -96.0, y: 42.0), (x: -91.0, y: 42.0), (x: -93.0, y: 42.0)]]),
        };
        let prepared = prepare(&[PopulationRecord::new("Iowa", 3_190_369)], &[ElectoralRecord::new("Iowa", 6)], vec![flat], Variant::Delta).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let table = dir.path().join("table.csv");
        let err = write_outputs(&prepared, &out, Some(&table), &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
        assert!(!table.exists());
        assert!(!out.join("vote_weight.svg").exists());
        assert!(!out.exists());
    }

    #[test]
    fn disjoint_sources_are_a_join_mismatch() {
        let err = prepare(&[PopulationRecord::new("A", 1)], &[ElectoralRecord::new("B", 1)], Vec::new(), Variant::Weight).unwrap_err();
        assert!(matches!(err, Error::JoinMismatch { .. }));
    }
}

#![doc = "Electoral vote weight per capita for U.S. states"]
mod census;
mod config;
mod error;
mod io;
mod map;
mod metrics;
mod pipeline;

#[doc(inline)]
pub use census::{parse_population, parse_population_str, CensusClient, PopulationSource, StaticPopulation};

#[doc(inline)]
pub use config::{CensusConfig, PipelineConfig, RenderConfig, Variant, DEFAULT_BOUNDARIES_PATH, DEFAULT_CENSUS_URL, DEFAULT_VOTES_PATH};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use io::{read_boundaries, read_electoral_csv, read_electoral_csv_str, write_metrics_csv, write_metrics_csv_to, write_metrics_json_to, StateBoundary};

#[doc(inline)]
pub use map::{figures_for, render_figure, render_figure_to_file, render_figure_to_string, spatial_join, Classification, Column, Figure, MappedState, Panel, Scheme};

#[doc(inline)]
pub use metrics::{apply_fair_allocation, compute_metrics, join_tables, sort_by_weight, ElectoralRecord, JoinReport, MetricTable, PopulationRecord, StateMetrics};

#[doc(inline)]
pub use pipeline::{load_metrics, prepare, run, write_outputs, PipelineOutput, Prepared};

//! Pipeline configuration with the defaults of the published analysis.

use std::{path::PathBuf, time::Duration};

/// 2020 decennial census (P.L. 94-171) total population by state.
pub const DEFAULT_CENSUS_URL: &str = "https://api.census.gov/data/2020/dec/pl?get=NAME,P1_001N&for=state:*";

/// Electoral vote counts, one row per state.
pub const DEFAULT_VOTES_PATH: &str = "data/statevotes.csv";

/// State boundary polygons with a `NAME` attribute.
pub const DEFAULT_BOUNDARIES_PATH: &str = "data/US_State_Boundaries/US_State_Boundaries.shp";

/// Which derived columns are computed and how many panels are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// `VOTE_WEIGHT` only; two panels.
    #[default]
    Weight,
    /// Adds `FAIR_NUM_VOTES` and `VOTE_DELTA`; three panels.
    Delta,
}

/// Settings for the census population request.
#[derive(Clone, Debug)]
pub struct CensusConfig {
    pub url: String,
    pub timeout: Duration,
    /// Extra attempts after the first failure.
    pub retries: u32,
    /// Delay before the first retry; doubled for each further retry.
    pub retry_delay: Duration,
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CENSUS_URL.to_string(),
            timeout: Duration::from_secs(30),
            retries: 1,
            retry_delay: Duration::from_secs(2),
        }
    }
}

/// Settings for SVG figure output.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Figure width in pixels.
    pub width: f64,
    pub margin: f64,
    /// Number of classes for the equal-interval and quantile panels.
    pub classes: usize,
    /// Shift longitudes east of the antimeridian west by 360 degrees.
    pub wrap_antimeridian: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { width: 800.0, margin: 10.0, classes: 5, wrap_antimeridian: true }
    }
}

/// Everything the pipeline needs besides the population source.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub votes_path: PathBuf,
    pub boundaries_path: PathBuf,
    pub output_dir: PathBuf,
    /// Optional CSV copy of the metric table.
    pub table_path: Option<PathBuf>,
    pub variant: Variant,
    pub render: RenderConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            votes_path: PathBuf::from(DEFAULT_VOTES_PATH),
            boundaries_path: PathBuf::from(DEFAULT_BOUNDARIES_PATH),
            output_dir: PathBuf::from("."),
            table_path: None,
            variant: Variant::default(),
            render: RenderConfig::default(),
        }
    }
}

use std::path::PathBuf;

use voteweight::{DEFAULT_BOUNDARIES_PATH, DEFAULT_CENSUS_URL, DEFAULT_VOTES_PATH};

/// Electoral vote weight CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "voteweight", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline and write choropleth SVG figures
    Render(RenderArgs),

    /// Compute the metric table without geometry
    Table(TableArgs),
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
pub enum VariantArg {
    /// Vote weight only (two panels)
    #[default]
    Weight,
    /// Vote weight plus fair allocation and delta (adds a three-panel figure)
    Delta,
}

impl From<VariantArg> for voteweight::Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Weight => Self::Weight,
            VariantArg::Delta => Self::Delta,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
pub enum TableFormat {
    #[default]
    Csv,
    Json,
}

/// Inputs shared by every command.
#[derive(clap::Args, Debug)]
pub struct SourceArgs {
    /// Census API URL returning NAME and P1_001N columns
    #[arg(long, default_value = DEFAULT_CENSUS_URL)]
    pub census_url: String,

    /// Electoral votes CSV with NAME and NUM_VOTES columns
    #[arg(long, default_value = DEFAULT_VOTES_PATH, value_hint = clap::ValueHint::FilePath)]
    pub votes: PathBuf,

    /// Census request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Census request retries after the first failure
    #[arg(long, default_value_t = 1)]
    pub retries: u32,

    /// Which derived columns to compute
    #[arg(long, value_enum, default_value_t = VariantArg::Weight)]
    pub variant: VariantArg,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// State boundary shapefile (.shp with .shx and .dbf alongside)
    #[arg(long, default_value = DEFAULT_BOUNDARIES_PATH, value_hint = clap::ValueHint::FilePath)]
    pub boundaries: PathBuf,

    /// Output directory for figures, defaults to "."
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Figure width in pixels
    #[arg(long, default_value_t = 800.0)]
    pub width: f64,

    /// Classes for the equal-interval and quantile panels
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub classes: u8,

    /// Also write the metric table to this CSV file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub table: Option<PathBuf>,

    /// Keep eastern-hemisphere longitudes where they are
    #[arg(long)]
    pub no_wrap_antimeridian: bool,
}

#[derive(clap::Args, Debug)]
pub struct TableArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = TableFormat::Csv)]
    pub format: TableFormat,
}

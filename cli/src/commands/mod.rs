pub mod render;
pub mod table;

use std::time::Duration;

use anyhow::{Context, Result};
use voteweight::{CensusClient, CensusConfig};

use crate::cli::SourceArgs;

/// Census client configured from the shared arguments.
pub(crate) fn census_client(args: &SourceArgs) -> Result<CensusClient> {
    let config = CensusConfig {
        url: args.census_url.clone(),
        timeout: Duration::from_secs(args.timeout),
        retries: args.retries,
        ..CensusConfig::default()
    };
    CensusClient::new(config).context("Failed to build census HTTP client")
}

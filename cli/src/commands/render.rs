use anyhow::{Context, Result};
use log::info;
use voteweight::{PipelineConfig, RenderConfig};

use crate::cli::{Cli, RenderArgs};

pub fn run(_cli: &Cli, args: &RenderArgs) -> Result<()> {
    let source = super::census_client(&args.source)?;

    let config = PipelineConfig {
        votes_path: args.source.votes.clone(),
        boundaries_path: args.boundaries.clone(),
        output_dir: args.output.clone().unwrap_or(".".into()),
        table_path: args.table.clone(),
        variant: args.source.variant.into(),
        render: RenderConfig {
            width: args.width,
            classes: args.classes as usize,
            wrap_antimeridian: !args.no_wrap_antimeridian,
            ..RenderConfig::default()
        },
    };

    let output = voteweight::run(&config, &source)
        .with_context(|| format!("Failed to render vote weight maps into {}", config.output_dir.display()))?;

    info!("[render] {} states, {} electors", output.table.len(), output.table.total_votes());
    for path in &output.figures {
        println!("{}", path.display());
    }
    Ok(())
}

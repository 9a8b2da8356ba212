mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{render, table};
use log::LevelFilter;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Render(args) => render::run(&cli, args),
        Commands::Table(args) => table::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }

//! siftool - SIF data object tool

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sif_cli::cmd;
use sif_cli::{AddConfig, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Add(args) => {
            let config = AddConfig::try_from(args)?;
            cmd::add::add(&config, cli.json)
        }
        Commands::Arch => cmd::arch::arch(cli.json),
    }
}

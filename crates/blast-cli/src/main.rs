//! Blast Report - Main Entry Point

use anyhow::Context;
use blast_cli::{init_logging, run, AppConfig, Cli};
use clap::Parser;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = AppConfig::load(cli.config.as_deref()).context("Failed to load settings")?;
    init_logging(&settings.log_level)?;

    info!("=== ForenSight Blast Report v{} ===", env!("CARGO_PKG_VERSION"));
    run(&cli, &settings)
}

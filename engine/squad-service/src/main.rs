//! Squad Optimizer command line entry point
//!
//! Loads an FPL season export or a fact snapshot, selects the best squad and
//! lineup for each requested gameweek and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use squad_service::{initialize_logging, load_config, run, validate_config, Cli, TextReport};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration, then let command line flags override it
    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_to(&mut config);
    validate_config(&config).context("Invalid configuration")?;

    initialize_logging(&config.logging)?;
    info!("Starting squad optimizer v{}", squad_optimizer::VERSION);

    let report = run(&cli, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report).context("Failed to serialize report")?);
    } else {
        print!("{}", TextReport::new(&report));
    }
    Ok(())
}

//! One optimization run: load facts, solve, report

use crate::cli::Cli;
use crate::config::ServiceConfig;
use anyhow::{bail, Context, Result};
use player_facts::{Horizon, Period, PlayerFacts};
use squad_optimizer::{OptimizationReport, SquadOptimizer};
use tracing::info;

/// Load the fact store named on the command line and the gameweeks to solve
pub fn load_facts(cli: &Cli) -> Result<(PlayerFacts, Vec<Period>)> {
    match (&cli.facts, &cli.data_dir) {
        (Some(path), _) => {
            let (_, facts) = fpl_loader::load_snapshot(path)
                .with_context(|| format!("Failed to load fact snapshot: {path:?}"))?;
            let periods = match cli.gameweek {
                Some(first) => Horizon::starting_at(first, cli.horizon)?.periods().collect(),
                None => facts.horizon().periods().collect(),
            };
            Ok((facts, periods))
        }
        (None, Some(dir)) => {
            let Some(first) = cli.gameweek else {
                bail!("--gameweek is required with --data-dir");
            };
            let horizon = Horizon::starting_at(first, cli.horizon)?;
            let facts = fpl_loader::load_season_dir(dir, horizon)
                .with_context(|| format!("Failed to load season data from {dir:?}"))?;
            Ok((facts, horizon.periods().collect()))
        }
        (None, None) => bail!("Either --facts or --data-dir is required"),
    }
}

/// Run the optimizer over the gameweeks selected on the command line
///
/// The backend is created before any data is read, so a bad backend name
/// fails without touching the inputs.
pub fn run(cli: &Cli, config: &ServiceConfig) -> Result<OptimizationReport> {
    let backend = squad_optimizer::from_config(&config.optimizer.backend)
        .context("Failed to initialize optimization backend")?;
    let optimizer = SquadOptimizer::new(backend, config.rules.clone())
        .context("Failed to configure optimizer")?
        .with_mode(config.optimizer.mode);

    let (facts, periods) = load_facts(cli)?;
    info!("Optimizing {} gameweeks over {} players", periods.len(), facts.len());

    if let Some(path) = &cli.save_snapshot {
        fpl_loader::save_snapshot(path, &cli.season, &facts)
            .with_context(|| format!("Failed to save snapshot: {path:?}"))?;
    }

    let report = optimizer.optimize_periods(&facts, &periods).context("Optimization failed")?;
    info!(
        "Solved {}/{} gameweeks, total objective {:.2}",
        report.periods.iter().filter(|p| p.is_solved()).count(),
        report.periods.len(),
        report.total_objective()
    );
    Ok(report)
}

//! # Command Line Interface
//!
//! Arguments of the `squad-optimizer` binary.

use crate::config::ServiceConfig;
use clap::{Parser, ValueEnum};
use player_facts::Period;
use squad_optimizer::HorizonMode;
use std::path::PathBuf;

/// Select an optimal FPL squad and starting lineup per gameweek
#[derive(Parser, Debug)]
#[command(name = "squad-optimizer", version)]
#[command(about = "Select an optimal FPL squad and starting lineup per gameweek")]
pub struct Cli {
    /// JSON fact snapshot to optimize
    #[arg(long, value_name = "JSON", conflicts_with = "data_dir", required_unless_present = "data_dir")]
    pub facts: Option<PathBuf>,

    /// FPL season export directory (players_raw.csv, teams.csv, fixtures.csv)
    #[arg(long, value_name = "DIR", requires = "gameweek")]
    pub data_dir: Option<PathBuf>,

    /// First gameweek to optimize (required with --data-dir)
    #[arg(short, long, value_name = "GW")]
    pub gameweek: Option<Period>,

    /// Number of gameweeks starting at --gameweek
    #[arg(long, default_value_t = 1, value_name = "N")]
    pub horizon: u32,

    /// TOML configuration file
    #[arg(short, long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Solve gameweeks one at a time or as one model
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Do not require the squad to spend at least the budget floor
    #[arg(long)]
    pub no_budget_floor: bool,

    /// Let players start regardless of their chance of playing
    #[arg(long)]
    pub no_eligibility: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the loaded facts to a JSON snapshot
    #[arg(long, value_name = "PATH")]
    pub save_snapshot: Option<PathBuf>,

    /// Season label stored in saved snapshots
    #[arg(long, default_value = "2025-26")]
    pub season: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    PerPeriod,
    Joint,
}

impl From<ModeArg> for HorizonMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::PerPeriod => HorizonMode::PerPeriod,
            ModeArg::Joint => HorizonMode::Joint,
        }
    }
}

impl Cli {
    /// Command line flags win over the file and environment
    pub fn apply_to(&self, config: &mut ServiceConfig) {
        if let Some(mode) = self.mode {
            config.optimizer.mode = mode.into();
        }
        if self.no_budget_floor {
            config.rules.enforce_budget_floor = false;
        }
        if self.no_eligibility {
            config.rules.enforce_eligibility = false;
        }
    }
}

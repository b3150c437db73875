//! Squad Optimizer - squad and lineup selection as a 0/1 program
//!
//! The optimizer turns a [`player_facts::PlayerFacts`] snapshot into a model
//! with a `squad` and a `lineup` boolean per player and gameweek, hands it to
//! a [`Backend`], and decodes the assignment into per-gameweek selections.
//!
//! ```text
//! PlayerFacts -> ModelBuilder (+ objective) -> Backend -> decoder -> OptimizationReport
//! ```
//!
//! Gameweeks are encoded independently: a horizon is the single-gameweek
//! encoding applied once per gameweek, solved either one gameweek at a time
//! or as one joint model (see [`HorizonMode`]).

pub mod backend;
pub mod builder;
pub mod decoder;
pub mod error;
pub mod model;
pub mod objective;
pub mod optimizer;
pub mod rules;

#[cfg(test)]
mod fixtures;

pub use backend::{
    from_config, Backend, BackendConfig, MicroLpBackend, SolveOutcome, SolveStatus, SolverStats,
    DEFAULT_BACKEND,
};
pub use builder::ModelBuilder;
pub use decoder::{decode, PeriodSelection, PositionGroup, SelectedPlayer};
pub use error::{OptimizerError, Result};
pub use model::{Assignment, Comparison, Constraint, LinearExpr, Model, Role, Rule, Sense, VarId};
pub use objective::NEUTRAL_DIFFICULTY;
pub use optimizer::{
    HorizonMode, OptimizationReport, PeriodReport, SolverDiagnostics, SquadOptimizer,
};
pub use rules::{
    PositionRange, PositionTable, SquadRules, BUDGET_CEILING, BUDGET_FLOOR, CLUB_CAP,
    ELIGIBILITY_CUTOFF, LINEUP_SIZE, SQUAD_SIZE,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

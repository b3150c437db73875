//! Optimization backends
//!
//! A backend takes a finished [`Model`] and returns a status, an assignment
//! when one was found, and search statistics. It is a blocking call: any
//! parallel search a backend runs stays behind [`Backend::solve`].

mod microlp;

pub use microlp::MicroLpBackend;

use crate::error::{OptimizerError, Result};
use crate::model::{Assignment, Model};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Name of the default backend
pub const DEFAULT_BACKEND: &str = "microlp";

/// Terminal state reported by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    /// Proven optimal assignment
    Optimal,
    /// Valid assignment without an optimality proof
    Feasible,
    /// Proven that no assignment satisfies the constraints
    Infeasible,
    /// Search ended without an assignment or a proof
    Unknown,
}

impl SolveStatus {
    /// Whether an assignment accompanies this status
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Search statistics. Counters a backend does not track are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverStats {
    pub conflicts: Option<u64>,
    pub branches: Option<u64>,
    pub wall_time: Duration,
}

/// What a backend returns from one solve call
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,

    /// Present exactly when `status.is_solved()`
    pub assignment: Option<Assignment>,

    pub objective_value: Option<f64>,

    pub stats: SolverStats,
}

impl SolveOutcome {
    /// Outcome carrying an assignment; the objective is evaluated from it
    pub fn solved(
        status: SolveStatus,
        model: &Model,
        assignment: Assignment,
        stats: SolverStats,
    ) -> Self {
        let objective_value = Some(model.objective().evaluate(&assignment));
        Self { status, assignment: Some(assignment), objective_value, stats }
    }

    /// Outcome without an assignment (infeasible or unknown)
    pub fn unsolved(status: SolveStatus, stats: SolverStats) -> Self {
        Self { status, assignment: None, objective_value: None, stats }
    }
}

/// A discrete optimization backend
pub trait Backend {
    /// Backend name used in logs and diagnostics
    fn name(&self) -> &str;

    /// Solve `model`, blocking until the backend finishes
    fn solve(&self, model: &Model) -> Result<SolveOutcome>;
}

/// Backend selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend name (currently only "microlp")
    pub name: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { name: DEFAULT_BACKEND.to_string() }
    }
}

/// Instantiate the configured backend
///
/// Callers do this before building any model so that an unavailable backend
/// aborts the run up front.
pub fn from_config(config: &BackendConfig) -> Result<Box<dyn Backend>> {
    match config.name.trim().to_ascii_lowercase().as_str() {
        "microlp" => Ok(Box::new(MicroLpBackend::new())),
        _ => Err(OptimizerError::BackendUnavailable(config.name.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_resolves_default_backend() {
        let backend = from_config(&BackendConfig::default()).unwrap();
        assert_eq!(backend.name(), DEFAULT_BACKEND);

        let backend = from_config(&BackendConfig { name: " MicroLP ".to_string() }).unwrap();
        assert_eq!(backend.name(), "microlp");
    }

    #[test]
    fn test_from_config_rejects_unknown_backend() {
        let err = from_config(&BackendConfig { name: "cp-sat".to_string() }).err().unwrap();
        assert!(matches!(err, OptimizerError::BackendUnavailable(name) if name == "cp-sat"));
    }

    #[test]
    fn test_status_flags() {
        assert!(SolveStatus::Optimal.is_solved());
        assert!(SolveStatus::Feasible.is_solved());
        assert!(!SolveStatus::Infeasible.is_solved());
        assert!(!SolveStatus::Unknown.is_solved());
        assert_eq!(SolveStatus::Infeasible.to_string(), "INFEASIBLE");
    }
}

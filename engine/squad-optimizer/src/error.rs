//! Error types for the squad optimizer

use crate::model::Role;
use player_facts::{FactsError, Period, PlayerId};
use thiserror::Error;

/// Result type for optimizer operations
pub type Result<T> = std::result::Result<T, OptimizerError>;

/// Fatal optimizer errors. An infeasible model is not one of these: it is
/// reported through [`crate::SolveStatus`].
#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Data integrity error: {0}")]
    Facts(#[from] FactsError),

    #[error("Invalid squad rules: {0}")]
    InvalidRules(String),

    #[error("Backend '{0}' is not available")]
    BackendUnavailable(String),

    #[error("Backend failure: {0}")]
    Backend(String),

    #[error("Gameweek {period} is outside the fact store horizon")]
    PeriodOutsideHorizon { period: Period },

    #[error("Model has no {role} variable for player {player} in gameweek {period}")]
    MissingVariable { role: Role, player: PlayerId, period: Period },

    #[error("Assignment has {actual} values but the model has {expected} variables")]
    AssignmentSize { expected: usize, actual: usize },

    #[error("Player {player} starts in gameweek {period} without being in the squad")]
    InconsistentAssignment { player: PlayerId, period: Period },
}

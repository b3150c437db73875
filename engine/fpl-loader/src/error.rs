//! Error types for the FPL loader

use player_facts::{ClubId, FactsError, Period, PlayerId};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type Result<T> = std::result::Result<T, LoaderError>;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Player {player} references unknown team code {team_code}")]
    MissingTeam { player: PlayerId, team_code: u32 },

    #[error("Club {club} has no fixture in gameweek {period}")]
    MissingFixture { club: ClubId, period: Period },

    #[error("Player {player} has no expected points for gameweek {period}")]
    MissingProjection { player: PlayerId, period: Period },

    #[error("Fact store rejected the loaded data: {0}")]
    Facts(#[from] FactsError),
}

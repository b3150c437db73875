//! Error types for the player fact store

use crate::types::{ClubId, Period, PlayerId};
use thiserror::Error;

/// Result type for fact store operations
pub type Result<T> = std::result::Result<T, FactsError>;

/// Data-integrity failures. None of these are recoverable: a run that hits
/// one must abort rather than guess a default.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FactsError {
    #[error("Horizon is empty: first gameweek {first} is after last gameweek {last}")]
    EmptyHorizon { first: Period, last: Period },

    #[error("Horizon of {len} gameweeks starting at gameweek {first} runs past the last representable gameweek")]
    HorizonOverflow { first: Period, len: u32 },

    #[error("Player {0} appears more than once")]
    DuplicatePlayer(PlayerId),

    #[error("Club {0} appears more than once")]
    DuplicateClub(ClubId),

    #[error("Player {player} references unknown club {club}")]
    UnknownClub { player: PlayerId, club: ClubId },

    #[error("Player {player} faces unknown club {club} in gameweek {period}")]
    UnknownOpponent { player: PlayerId, period: Period, club: ClubId },

    #[error("Player {player} has unknown position code {code}")]
    UnknownPosition { player: PlayerId, code: u8 },

    #[error("Player {player} has fixture difficulty {difficulty} in gameweek {period} (expected 1-5)")]
    DifficultyOutOfRange { player: PlayerId, period: Period, difficulty: u8 },

    #[error("Player {player} has chance of playing {eligibility} in gameweek {period} (expected 0-100)")]
    EligibilityOutOfRange { player: PlayerId, period: Period, eligibility: u8 },

    #[error("Player {player} has non-finite expected points in gameweek {period}")]
    InvalidExpectedPoints { player: PlayerId, period: Period },

    #[error("Player {player} has no facts for gameweek {period}")]
    MissingPeriodFacts { player: PlayerId, period: Period },
}

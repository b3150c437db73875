//! Player Facts - Immutable player/club/gameweek snapshot
//!
//! This crate holds the normalized facts the squad optimizer reads: who the
//! candidate players are, what they cost, which club they play for, and their
//! per-gameweek projections. A [`PlayerFacts`] value is built once per run,
//! validated on construction, and only ever handed out by shared reference.

pub mod error;
pub mod store;
pub mod types;

pub use error::{FactsError, Result};
pub use store::PlayerFacts;
pub use types::{Club, ClubId, Horizon, PeriodFacts, Period, Player, PlayerId, Position};

/// Lowest (easiest) fixture difficulty rating
pub const MIN_FIXTURE_DIFFICULTY: u8 = 1;

/// Highest (hardest) fixture difficulty rating
pub const MAX_FIXTURE_DIFFICULTY: u8 = 5;

/// Upper bound of the chance-of-playing percentage
pub const MAX_ELIGIBILITY: u8 = 100;

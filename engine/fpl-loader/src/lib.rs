//! FPL Loader - season exports and snapshots into [`PlayerFacts`]
//!
//! Reads the `players_raw.csv`, `teams.csv` and `fixtures.csv` files of an FPL
//! season export (plus an optional `projections.csv`) and normalizes them into
//! a validated [`player_facts::PlayerFacts`] store. Stores can also be saved
//! to and loaded from JSON snapshots.
//!
//! [`PlayerFacts`]: player_facts::PlayerFacts

pub mod error;
pub mod raw;
pub mod season;
pub mod snapshot;

pub use error::{LoaderError, Result};
pub use season::{load_season_dir, FIXTURES_FILE, PLAYERS_FILE, PROJECTIONS_FILE, TEAMS_FILE};
pub use snapshot::{load_snapshot, save_snapshot, FactsSnapshot};

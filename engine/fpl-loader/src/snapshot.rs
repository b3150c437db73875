//! JSON fact snapshots
//!
//! A snapshot is the validated store written out as it was loaded, so a run
//! can be repeated later without the CSV export.

use crate::error::{LoaderError, Result};
use chrono::{DateTime, Utc};
use player_facts::{Club, Horizon, Player, PlayerFacts};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactsSnapshot {
    /// Season label (e.g., "2025-26")
    pub season: String,

    pub generated_at: DateTime<Utc>,

    pub horizon: Horizon,

    pub clubs: Vec<Club>,

    pub players: Vec<Player>,
}

impl FactsSnapshot {
    pub fn from_facts(season: impl Into<String>, facts: &PlayerFacts) -> Self {
        Self {
            season: season.into(),
            generated_at: Utc::now(),
            horizon: facts.horizon(),
            clubs: facts.clubs().cloned().collect(),
            players: facts.players().to_vec(),
        }
    }

    /// Validate the snapshot into a fact store
    pub fn into_facts(self) -> Result<PlayerFacts> {
        Ok(PlayerFacts::new(self.horizon, self.clubs, self.players)?)
    }
}

/// Read a snapshot file; the contents go through the same validation as a CSV load
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<(FactsSnapshot, PlayerFacts)> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|source| LoaderError::Io { path: path.to_path_buf(), source })?;
    let snapshot: FactsSnapshot = serde_json::from_str(&content)?;
    let facts = snapshot.clone().into_facts()?;

    info!(
        "Loaded {} snapshot from {:?} ({} players, {}, generated {})",
        snapshot.season,
        path,
        facts.len(),
        facts.horizon(),
        snapshot.generated_at
    );
    Ok((snapshot, facts))
}

/// Write `facts` as a pretty-printed snapshot
pub fn save_snapshot(path: impl AsRef<Path>, season: &str, facts: &PlayerFacts) -> Result<()> {
    let path = path.as_ref();
    let snapshot = FactsSnapshot::from_facts(season, facts);
    let content = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, content).map_err(|source| LoaderError::Io { path: path.to_path_buf(), source })?;
    info!("Saved snapshot of {} players to {:?}", facts.len(), path);
    Ok(())
}

//! Squad and lineup composition rules

use crate::error::{OptimizerError, Result};
use player_facts::Position;
use serde::{Deserialize, Serialize};

/// Players in a squad
pub const SQUAD_SIZE: u32 = 15;

/// Players in a starting lineup
pub const LINEUP_SIZE: u32 = 11;

/// Maximum squad spend, in tenths (1000 = 100.0m)
pub const BUDGET_CEILING: u32 = 1000;

/// Minimum squad spend when the floor is enforced
pub const BUDGET_FLOOR: u32 = 970;

/// Maximum squad players from one club
pub const CLUB_CAP: u32 = 3;

/// Players whose chance of playing is below this may not start
pub const ELIGIBILITY_CUTOFF: u8 = 75;

/// Squad quota per position (GK, DEF, MID, FWD)
pub const SQUAD_QUOTAS: PositionTable<u32> =
    PositionTable { goalkeeper: 2, defender: 5, midfielder: 5, forward: 3 };

/// Allowed number of starters per position
pub const LINEUP_RANGES: PositionTable<PositionRange> = PositionTable {
    goalkeeper: PositionRange { min: 1, max: 1 },
    defender: PositionRange { min: 3, max: 5 },
    midfielder: PositionRange { min: 2, max: 5 },
    forward: PositionRange { min: 1, max: 3 },
};

/// One value per position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionTable<T> {
    pub goalkeeper: T,
    pub defender: T,
    pub midfielder: T,
    pub forward: T,
}

impl<T: Copy> PositionTable<T> {
    pub fn get(&self, position: Position) -> T {
        match position {
            Position::Goalkeeper => self.goalkeeper,
            Position::Defender => self.defender,
            Position::Midfielder => self.midfielder,
            Position::Forward => self.forward,
        }
    }

    pub fn set(&mut self, position: Position, value: T) {
        match position {
            Position::Goalkeeper => self.goalkeeper = value,
            Position::Defender => self.defender = value,
            Position::Midfielder => self.midfielder = value,
            Position::Forward => self.forward = value,
        }
    }

    /// Entries in squad display order
    pub fn iter(&self) -> impl Iterator<Item = (Position, T)> + '_ {
        Position::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

/// Inclusive bound on a count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRange {
    pub min: u32,
    pub max: u32,
}

impl PositionRange {
    pub fn exactly(count: u32) -> Self {
        Self { min: count, max: count }
    }

    pub fn is_exact(&self) -> bool {
        self.min == self.max
    }

    pub fn contains(&self, count: u32) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

/// Every tunable bound the model builder encodes
///
/// Defaults come from the constants above. The budget floor and the
/// eligibility cutoff are switched with their `enforce_*` flags so either can
/// be turned off without touching the rest of the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquadRules {
    pub squad_size: u32,
    pub lineup_size: u32,
    pub budget_ceiling: u32,
    pub budget_floor: u32,
    pub enforce_budget_floor: bool,
    pub club_cap: u32,
    pub eligibility_cutoff: u8,
    pub enforce_eligibility: bool,
    pub squad_quotas: PositionTable<u32>,
    pub lineup_ranges: PositionTable<PositionRange>,
}

impl Default for SquadRules {
    fn default() -> Self {
        Self {
            squad_size: SQUAD_SIZE,
            lineup_size: LINEUP_SIZE,
            budget_ceiling: BUDGET_CEILING,
            budget_floor: BUDGET_FLOOR,
            enforce_budget_floor: true,
            club_cap: CLUB_CAP,
            eligibility_cutoff: ELIGIBILITY_CUTOFF,
            enforce_eligibility: true,
            squad_quotas: SQUAD_QUOTAS,
            lineup_ranges: LINEUP_RANGES,
        }
    }
}

impl SquadRules {
    /// Budget floor, if enforced
    pub fn active_budget_floor(&self) -> Option<u32> {
        self.enforce_budget_floor.then_some(self.budget_floor)
    }

    /// Eligibility cutoff, if enforced
    pub fn active_eligibility_cutoff(&self) -> Option<u8> {
        self.enforce_eligibility.then_some(self.eligibility_cutoff)
    }

    pub fn without_budget_floor(mut self) -> Self {
        self.enforce_budget_floor = false;
        self
    }

    pub fn without_eligibility(mut self) -> Self {
        self.enforce_eligibility = false;
        self
    }

    /// Reject rule sets that contradict themselves regardless of the player pool
    pub fn validate(&self) -> Result<()> {
        let quota_total: u32 = self.squad_quotas.iter().map(|(_, q)| q).sum();
        if quota_total != self.squad_size {
            return Err(OptimizerError::InvalidRules(format!(
                "squad quotas sum to {quota_total} but squad size is {}",
                self.squad_size
            )));
        }

        if self.lineup_size > self.squad_size {
            return Err(OptimizerError::InvalidRules(format!(
                "lineup size {} exceeds squad size {}",
                self.lineup_size, self.squad_size
            )));
        }

        for (position, range) in self.lineup_ranges.iter() {
            if range.min > range.max {
                return Err(OptimizerError::InvalidRules(format!(
                    "{position} lineup range {}..={} is empty",
                    range.min, range.max
                )));
            }
            if range.min > self.squad_quotas.get(position) {
                return Err(OptimizerError::InvalidRules(format!(
                    "{position} needs {} starters but the squad holds {}",
                    range.min,
                    self.squad_quotas.get(position)
                )));
            }
        }

        let min_total: u32 = self.lineup_ranges.iter().map(|(_, r)| r.min).sum();
        let max_total: u32 = self.lineup_ranges.iter().map(|(_, r)| r.max).sum();
        if !(min_total..=max_total).contains(&self.lineup_size) {
            return Err(OptimizerError::InvalidRules(format!(
                "lineup size {} is outside the reachable range {min_total}..={max_total}",
                self.lineup_size
            )));
        }

        if self.enforce_budget_floor && self.budget_floor > self.budget_ceiling {
            return Err(OptimizerError::InvalidRules(format!(
                "budget floor {} exceeds ceiling {}",
                self.budget_floor, self.budget_ceiling
            )));
        }

        Ok(())
    }
}

use crate::error::{FactsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

/// Player identifier (FPL element id)
pub type PlayerId = u32;

/// Club identifier (FPL team id)
pub type ClubId = u32;

/// Gameweek index
pub type Period = u32;

/// Playing position. A player holds exactly one for the whole season.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    /// All positions in squad display order
    pub const ALL: [Position; 4] =
        [Position::Goalkeeper, Position::Defender, Position::Midfielder, Position::Forward];

    /// Map an FPL `element_type` code (1-4) to a position
    pub fn from_element_type(code: u8) -> Option<Position> {
        match code {
            1 => Some(Position::Goalkeeper),
            2 => Some(Position::Defender),
            3 => Some(Position::Midfielder),
            4 => Some(Position::Forward),
            _ => None,
        }
    }

    /// FPL `element_type` code for this position
    pub fn element_type(&self) -> u8 {
        match self {
            Position::Goalkeeper => 1,
            Position::Defender => 2,
            Position::Midfielder => 3,
            Position::Forward => 4,
        }
    }

    /// Short label (e.g., "GK", "DEF")
    pub fn short_name(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

    /// Group heading used when listing a squad
    pub fn plural(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeepers",
            Position::Defender => "Defenders",
            Position::Midfielder => "Midfielders",
            Position::Forward => "Forwards",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// A club. Carries no behaviour beyond its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,

    /// Short name (e.g., "ARS", "MCI")
    pub name: String,
}

impl Club {
    pub fn new(id: ClubId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Time-varying facts for one player in one gameweek
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodFacts {
    /// Projected points if the player starts
    pub expected_points: f64,

    /// Difficulty of the fixture, 1 (easy) to 5 (hard)
    pub fixture_difficulty: u8,

    /// Club faced this gameweek, when known
    #[serde(default)]
    pub opponent: Option<ClubId>,

    /// Chance of playing (0-100). `None` means no availability news.
    #[serde(default)]
    pub eligibility: Option<u8>,
}

impl PeriodFacts {
    pub fn new(expected_points: f64, fixture_difficulty: u8) -> Self {
        Self { expected_points, fixture_difficulty, opponent: None, eligibility: None }
    }

    pub fn against(mut self, opponent: ClubId) -> Self {
        self.opponent = Some(opponent);
        self
    }

    pub fn with_eligibility(mut self, eligibility: u8) -> Self {
        self.eligibility = Some(eligibility);
        self
    }
}

/// A candidate player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Display name (e.g., "Bukayo Saka")
    pub name: String,

    /// Price in tenths of a currency unit (55 = 5.5m)
    pub price: u32,

    pub position: Position,

    pub club_id: ClubId,

    /// Facts keyed by gameweek
    #[serde(default)]
    pub periods: BTreeMap<Period, PeriodFacts>,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        price: u32,
        position: Position,
        club_id: ClubId,
    ) -> Self {
        Self { id, name: name.into(), price, position, club_id, periods: BTreeMap::new() }
    }

    /// Attach facts for a gameweek, replacing any previous entry
    pub fn with_period(mut self, period: Period, facts: PeriodFacts) -> Self {
        self.periods.insert(period, facts);
        self
    }

    pub fn period(&self, period: Period) -> Option<&PeriodFacts> {
        self.periods.get(&period)
    }
}

/// Contiguous, ordered range of gameweeks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horizon {
    pub first: Period,
    pub last: Period,
}

impl Horizon {
    pub fn new(first: Period, last: Period) -> Result<Self> {
        let horizon = Self { first, last };
        horizon.validate()?;
        Ok(horizon)
    }

    /// Horizon covering one gameweek
    pub fn single(period: Period) -> Self {
        Self { first: period, last: period }
    }

    /// Horizon of `len` gameweeks starting at `first`
    pub fn starting_at(first: Period, len: u32) -> Result<Self> {
        if len == 0 {
            return Err(FactsError::EmptyHorizon { first, last: first.saturating_sub(1) });
        }
        let last = first.checked_add(len - 1).ok_or(FactsError::HorizonOverflow { first, len })?;
        Self::new(first, last)
    }

    pub fn validate(&self) -> Result<()> {
        if self.first > self.last {
            return Err(FactsError::EmptyHorizon { first: self.first, last: self.last });
        }
        Ok(())
    }

    pub fn periods(&self) -> RangeInclusive<Period> {
        self.first..=self.last
    }

    pub fn contains(&self, period: Period) -> bool {
        self.periods().contains(&period)
    }

    pub fn len(&self) -> usize {
        (self.last - self.first) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "GW{}", self.first)
        } else {
            write!(f, "GW{}-GW{}", self.first, self.last)
        }
    }
}

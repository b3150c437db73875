//! Row types of the FPL season export
//!
//! Only the columns the optimizer needs are declared; the exports carry many
//! more and those are ignored. Values the API leaves blank (or writes as
//! "None") read as `None`.

use player_facts::{ClubId, Period, PlayerId};
use serde::Deserialize;

/// One row of `players_raw.csv`
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlayer {
    pub id: PlayerId,
    pub first_name: String,
    pub second_name: String,

    /// Price in tenths
    pub now_cost: u32,

    /// 1 = GK, 2 = DEF, 3 = MID, 4 = FWD
    pub element_type: u8,

    pub team_code: u32,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub ep_this: Option<f64>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub ep_next: Option<f64>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub chance_of_playing_this_round: Option<u8>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub chance_of_playing_next_round: Option<u8>,
}

impl RawPlayer {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.second_name.trim()).trim().to_string()
    }
}

/// One row of `teams.csv`
#[derive(Debug, Clone, Deserialize)]
pub struct RawTeam {
    /// Code players reference through `team_code`
    pub code: u32,

    /// Id fixtures reference through `team_h` / `team_a`
    pub id: ClubId,

    pub short_name: String,
}

/// One row of `fixtures.csv`
#[derive(Debug, Clone, Deserialize)]
pub struct RawFixture {
    /// Gameweek; blank for fixtures not yet scheduled
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub event: Option<Period>,

    pub team_h: ClubId,
    pub team_a: ClubId,
    pub team_h_difficulty: u8,
    pub team_a_difficulty: u8,
}

/// One row of the optional `projections.csv`
#[derive(Debug, Clone, Deserialize)]
pub struct RawProjection {
    pub id: PlayerId,
    pub event: Period,
    pub expected_points: f64,
}

//! FPL season directory loader

use crate::error::{LoaderError, Result};
use crate::raw::{RawFixture, RawPlayer, RawProjection, RawTeam};
use player_facts::{
    Club, ClubId, FactsError, Horizon, PeriodFacts, Period, Player, PlayerFacts, PlayerId, Position,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

pub const PLAYERS_FILE: &str = "players_raw.csv";
pub const TEAMS_FILE: &str = "teams.csv";
pub const FIXTURES_FILE: &str = "fixtures.csv";

/// Optional per-gameweek projections (`id, event, expected_points`)
pub const PROJECTIONS_FILE: &str = "projections.csv";

/// A club's fixture in one gameweek, seen from that club's side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClubFixture {
    opponent: ClubId,
    difficulty: u8,
}

/// Load a season export directory into a validated fact store covering `horizon`
///
/// `ep_this` and `chance_of_playing_this_round` describe the first gameweek of
/// the horizon, `ep_next` and `chance_of_playing_next_round` the second.
/// Later gameweeks need `projections.csv` entries.
pub fn load_season_dir(dir: impl AsRef<Path>, horizon: Horizon) -> Result<PlayerFacts> {
    let dir = dir.as_ref();
    horizon.validate()?;
    info!("Loading FPL season data from {:?} for {}", dir, horizon);

    let teams: Vec<RawTeam> = read_rows(&dir.join(TEAMS_FILE))?;
    let fixtures: Vec<RawFixture> = read_rows(&dir.join(FIXTURES_FILE))?;
    let raw_players: Vec<RawPlayer> = read_rows(&dir.join(PLAYERS_FILE))?;

    let projections_path = dir.join(PROJECTIONS_FILE);
    let projections: HashMap<(PlayerId, Period), f64> = if projections_path.exists() {
        let rows: Vec<RawProjection> = read_rows(&projections_path)?;
        info!("Loaded {} projections", rows.len());
        rows.into_iter().map(|r| ((r.id, r.event), r.expected_points)).collect()
    } else {
        debug!("No {} in {:?}, using ep_this/ep_next", PROJECTIONS_FILE, dir);
        HashMap::new()
    };

    let clubs: Vec<Club> = teams.iter().map(|t| Club::new(t.id, t.short_name.trim())).collect();
    let club_by_code: HashMap<u32, ClubId> = teams.iter().map(|t| (t.code, t.id)).collect();
    let schedule = club_fixtures(&fixtures, horizon);

    let mut players = Vec::with_capacity(raw_players.len());
    for raw in &raw_players {
        players.push(to_player(raw, horizon, &club_by_code, &schedule, &projections)?);
    }

    let facts = PlayerFacts::new(horizon, clubs, players)?;
    info!("Loaded {} players across {} clubs", facts.len(), facts.clubs().count());
    Ok(facts)
}

/// Index horizon fixtures by `(gameweek, club)`
///
/// The home side takes `team_h_difficulty` and the away side
/// `team_a_difficulty`. A club playing twice in one gameweek keeps its last
/// listed fixture.
fn club_fixtures(fixtures: &[RawFixture], horizon: Horizon) -> HashMap<(Period, ClubId), ClubFixture> {
    let mut schedule = HashMap::new();
    for fixture in fixtures {
        let Some(period) = fixture.event.filter(|&e| horizon.contains(e)) else {
            continue;
        };
        let sides = [
            (fixture.team_h, ClubFixture { opponent: fixture.team_a, difficulty: fixture.team_h_difficulty }),
            (fixture.team_a, ClubFixture { opponent: fixture.team_h, difficulty: fixture.team_a_difficulty }),
        ];
        for (club, side) in sides {
            if schedule.insert((period, club), side).is_some() {
                warn!("Club {} has more than one fixture in GW{}, keeping the last", club, period);
            }
        }
    }
    schedule
}

fn to_player(
    raw: &RawPlayer,
    horizon: Horizon,
    club_by_code: &HashMap<u32, ClubId>,
    schedule: &HashMap<(Period, ClubId), ClubFixture>,
    projections: &HashMap<(PlayerId, Period), f64>,
) -> Result<Player> {
    let position = Position::from_element_type(raw.element_type)
        .ok_or(FactsError::UnknownPosition { player: raw.id, code: raw.element_type })?;
    let club = *club_by_code
        .get(&raw.team_code)
        .ok_or(LoaderError::MissingTeam { player: raw.id, team_code: raw.team_code })?;

    let mut player = Player::new(raw.id, raw.display_name(), raw.now_cost, position, club);
    for (offset, period) in horizon.periods().enumerate() {
        let fixture = schedule
            .get(&(period, club))
            .ok_or(LoaderError::MissingFixture { club, period })?;

        let (ep, chance) = match offset {
            0 => (raw.ep_this, raw.chance_of_playing_this_round),
            1 => (raw.ep_next, raw.chance_of_playing_next_round),
            _ => (None, None),
        };
        let expected_points = projections
            .get(&(raw.id, period))
            .copied()
            .or(ep)
            .ok_or(LoaderError::MissingProjection { player: raw.id, period })?;

        let mut facts = PeriodFacts::new(expected_points, fixture.difficulty).against(fixture.opponent);
        if let Some(chance) = chance {
            facts = facts.with_eligibility(chance);
        }
        player = player.with_period(period, facts);
    }
    Ok(player)
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|source| LoaderError::Io { path: path.to_path_buf(), source })?;
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .map_err(|source| LoaderError::Csv { path: path.to_path_buf(), source })?;
    debug!("Read {} rows from {:?}", rows.len(), path);
    Ok(rows)
}

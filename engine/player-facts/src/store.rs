use crate::error::{FactsError, Result};
use crate::types::{Club, ClubId, Horizon, PeriodFacts, Period, Player, PlayerId, Position};
use crate::{MAX_ELIGIBILITY, MAX_FIXTURE_DIFFICULTY, MIN_FIXTURE_DIFFICULTY};
use std::collections::{BTreeMap, HashMap};

/// Player Fact Store - the read-only snapshot every optimizer stage consumes
///
/// Construction validates everything that can be checked without knowing
/// which gameweeks a caller will model. Per-gameweek completeness is checked
/// on lookup through [`PlayerFacts::period_facts`], so a model builder sees a
/// data-integrity error for exactly the player and gameweek that is missing.
#[derive(Debug, Clone)]
pub struct PlayerFacts {
    horizon: Horizon,

    /// Clubs by id
    clubs: BTreeMap<ClubId, Club>,

    /// Players ordered by id
    players: Vec<Player>,

    /// Map from player id to index in `players`
    index: HashMap<PlayerId, usize>,
}

impl PlayerFacts {
    /// Validate and freeze a snapshot
    pub fn new(horizon: Horizon, clubs: Vec<Club>, mut players: Vec<Player>) -> Result<Self> {
        horizon.validate()?;

        let mut club_map = BTreeMap::new();
        for club in clubs {
            if club_map.contains_key(&club.id) {
                return Err(FactsError::DuplicateClub(club.id));
            }
            club_map.insert(club.id, club);
        }

        players.sort_by_key(|p| p.id);
        let mut index = HashMap::with_capacity(players.len());
        for (idx, player) in players.iter().enumerate() {
            if index.insert(player.id, idx).is_some() {
                return Err(FactsError::DuplicatePlayer(player.id));
            }
            Self::validate_player(player, &club_map)?;
        }

        Ok(Self { horizon, clubs: club_map, players, index })
    }

    fn validate_player(player: &Player, clubs: &BTreeMap<ClubId, Club>) -> Result<()> {
        if !clubs.contains_key(&player.club_id) {
            return Err(FactsError::UnknownClub { player: player.id, club: player.club_id });
        }

        for (&period, facts) in &player.periods {
            if !facts.expected_points.is_finite() {
                return Err(FactsError::InvalidExpectedPoints { player: player.id, period });
            }
            if !(MIN_FIXTURE_DIFFICULTY..=MAX_FIXTURE_DIFFICULTY).contains(&facts.fixture_difficulty)
            {
                return Err(FactsError::DifficultyOutOfRange {
                    player: player.id,
                    period,
                    difficulty: facts.fixture_difficulty,
                });
            }
            if let Some(eligibility) = facts.eligibility {
                if eligibility > MAX_ELIGIBILITY {
                    return Err(FactsError::EligibilityOutOfRange {
                        player: player.id,
                        period,
                        eligibility,
                    });
                }
            }
            if let Some(opponent) = facts.opponent {
                if !clubs.contains_key(&opponent) {
                    return Err(FactsError::UnknownOpponent {
                        player: player.id,
                        period,
                        club: opponent,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// All players, ordered by id
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.index.get(&id).map(|&idx| &self.players[idx])
    }

    /// All clubs, ordered by id
    pub fn clubs(&self) -> impl Iterator<Item = &Club> {
        self.clubs.values()
    }

    pub fn club(&self, id: ClubId) -> Option<&Club> {
        self.clubs.get(&id)
    }

    /// Players holding `position`
    pub fn players_at(&self, position: Position) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.position == position)
    }

    /// Players registered with `club`
    pub fn players_of(&self, club: ClubId) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.club_id == club)
    }

    /// Facts for `player` in `period`, or a data-integrity error if absent
    pub fn period_facts<'a>(&self, player: &'a Player, period: Period) -> Result<&'a PeriodFacts> {
        player.period(period).ok_or(FactsError::MissingPeriodFacts { player: player.id, period })
    }

    /// Check that every player carries facts for every gameweek of the horizon
    pub fn ensure_complete(&self) -> Result<()> {
        for period in self.horizon.periods() {
            for player in &self.players {
                self.period_facts(player, period)?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

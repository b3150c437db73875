//! Synthetic fact snapshots shared by the optimizer tests

use player_facts::{
    Club, ClubId, Horizon, PeriodFacts, Period, Player, PlayerFacts, PlayerId, Position,
};

/// Cheap forward with the best projection in the pool, ruled out with a 0% chance
pub const INJURED_FORWARD: PlayerId = 40;

/// Midfielder flagged at 50%
pub const DOUBTFUL_MIDFIELDER: PlayerId = 19;

/// Defender flagged exactly at the cutoff, which still allows starting
pub const BORDERLINE_DEFENDER: PlayerId = 8;

const CLUB_NAMES: [&str; 10] = ["ARS", "AVL", "BOU", "BRE", "BHA", "CHE", "CRY", "EVE", "FUL", "LIV"];

fn clubs() -> Vec<Club> {
    CLUB_NAMES.iter().enumerate().map(|(i, name)| Club::new(i as ClubId + 1, *name)).collect()
}

fn opponent(club: ClubId, period: Period) -> ClubId {
    let shift = period % 9 + 1;
    (club - 1 + shift) % 10 + 1
}

/// (position, price) for ids 1..=39 in id order
fn roster() -> Vec<(Position, u32)> {
    use Position::*;
    let mut out = Vec::new();
    for price in [45, 45, 50, 50, 55] {
        out.push((Goalkeeper, price));
    }
    for price in [45, 45, 50, 50, 55, 55, 60, 60, 65, 70] {
        out.push((Defender, price));
    }
    for price in [55, 60, 65, 70, 75, 80, 85, 95, 105, 125, 50, 58, 62, 68] {
        out.push((Midfielder, price));
    }
    for price in [50, 60, 70, 75, 80, 90, 100, 140, 65, 72] {
        out.push((Forward, price));
    }
    out
}

fn build_pool(periods: &[Period], vary_by_period: bool) -> PlayerFacts {
    let first = *periods.iter().min().expect("at least one period");
    let last = *periods.iter().max().expect("at least one period");

    let mut players = Vec::new();
    for (idx, (position, price)) in roster().into_iter().enumerate() {
        let id = idx as PlayerId + 1;
        let club = id % 10 + 1;
        let mut player = Player::new(id, format!("Player {id}"), price, position, club);
        for &period in periods {
            let salt = if vary_by_period { period } else { 0 };
            let expected = f64::from(price) / 12.0 + f64::from((id * 7 + salt) % 11) * 0.25;
            let difficulty = ((id + salt) % 5 + 1) as u8;
            let mut facts = PeriodFacts::new(expected, difficulty).against(opponent(club, period));
            match id {
                DOUBTFUL_MIDFIELDER => facts = facts.with_eligibility(50),
                BORDERLINE_DEFENDER => facts = facts.with_eligibility(75),
                3 | 12 => facts = facts.with_eligibility(100),
                _ => {}
            }
            player = player.with_period(period, facts);
        }
        players.push(player);
    }

    // Best projection in the pool on a 4.5m price tag, but not fit to play
    let mut injured = Player::new(INJURED_FORWARD, "Injured Striker", 45, Position::Forward, 3);
    for &period in periods {
        injured = injured.with_period(
            period,
            PeriodFacts::new(15.0, 1).against(opponent(3, period)).with_eligibility(0),
        );
    }
    players.push(injured);

    PlayerFacts::new(Horizon::new(first, last).expect("ordered periods"), clubs(), players)
        .expect("valid synthetic pool")
}

/// 40 players over 10 clubs with facts varying by gameweek
pub fn standard_pool(periods: &[Period]) -> PlayerFacts {
    build_pool(periods, true)
}

/// Same pool, with every gameweek carrying identical facts
pub fn flat_pool(periods: &[Period]) -> PlayerFacts {
    build_pool(periods, false)
}

pub fn empty_pool(period: Period) -> PlayerFacts {
    PlayerFacts::new(Horizon::single(period), clubs(), Vec::new()).expect("valid empty pool")
}

/// Copy of `facts` over a different horizon, keeping the players' facts as they are
pub fn with_horizon(facts: &PlayerFacts, first: Period, last: Period) -> PlayerFacts {
    PlayerFacts::new(
        Horizon::new(first, last).expect("ordered periods"),
        facts.clubs().cloned().collect(),
        facts.players().to_vec(),
    )
    .expect("valid pool")
}

/// Players whose chance of playing in `period` is below `cutoff`
pub fn doubtful_players(facts: &PlayerFacts, period: Period, cutoff: u8) -> usize {
    facts
        .players()
        .iter()
        .filter(|p| p.period(period).and_then(|f| f.eligibility).is_some_and(|e| e < cutoff))
        .count()
}

/// 20 players over 4 clubs where exactly one 15-player squad fits the budget
///
/// The 15 core players cost exactly 1000. Each of the 5 decoys outscores and
/// outprices every core player of its position, and position quotas force
/// like-for-like swaps, so any squad containing a decoy exceeds the ceiling.
/// Four clubs cannot field 15 players under a cap of 3, so callers raise the
/// cap to 4. Returns the facts and the core player ids.
pub fn unique_squad_pool(period: Period) -> (PlayerFacts, Vec<PlayerId>) {
    use Position::*;
    let core: [(Position, u32, ClubId); 15] = [
        (Goalkeeper, 50, 1),
        (Goalkeeper, 50, 2),
        (Defender, 60, 1),
        (Defender, 60, 2),
        (Defender, 60, 3),
        (Defender, 60, 4),
        (Defender, 60, 1),
        (Midfielder, 70, 2),
        (Midfielder, 70, 3),
        (Midfielder, 70, 4),
        (Midfielder, 70, 1),
        (Midfielder, 70, 2),
        (Forward, 84, 3),
        (Forward, 83, 4),
        (Forward, 83, 3),
    ];
    let decoys: [(Position, u32, ClubId); 5] = [
        (Goalkeeper, 51, 4),
        (Defender, 61, 3),
        (Midfielder, 71, 4),
        (Forward, 90, 1),
        (Forward, 95, 2),
    ];

    let clubs = vec![Club::new(1, "ARS"), Club::new(2, "CHE"), Club::new(3, "LIV"), Club::new(4, "TOT")];
    let mut players = Vec::new();
    let mut core_ids = Vec::new();
    for (idx, (position, price, club)) in core.into_iter().enumerate() {
        let id = idx as PlayerId + 1;
        core_ids.push(id);
        players.push(
            Player::new(id, format!("Core {id}"), price, position, club)
                .with_period(period, PeriodFacts::new(2.0 + idx as f64 * 0.1, 3)),
        );
    }
    for (idx, (position, price, club)) in decoys.into_iter().enumerate() {
        let id = 100 + idx as PlayerId;
        players.push(
            Player::new(id, format!("Decoy {id}"), price, position, club)
                .with_period(period, PeriodFacts::new(12.0, 1)),
        );
    }

    let facts = PlayerFacts::new(Horizon::single(period), clubs, players).expect("valid pool");
    (facts, core_ids)
}

/// 30 players over 10 clubs where the best starters are the cheapest
///
/// Each position has its quota of 4.0m players projecting 10 points and its
/// quota of 9.0m players projecting 1 point. Filling the bench with 9.0m
/// players spends at most 80.0m, so reaching a 97.0m floor takes eight
/// expensive players, at least four of them starting. The only squads between
/// 97.0m and 100.0m spend exactly 100.0m.
pub fn bargain_pool(period: Period) -> PlayerFacts {
    use Position::*;
    let quotas = [(Goalkeeper, 2), (Defender, 5), (Midfielder, 5), (Forward, 3)];

    let mut players = Vec::new();
    for (price, expected) in [(40, 10.0), (90, 1.0)] {
        for (position, count) in quotas {
            for _ in 0..count {
                let id = players.len() as PlayerId + 1;
                let club = id % 10 + 1;
                players.push(
                    Player::new(id, format!("Player {id}"), price, position, club)
                        .with_period(period, PeriodFacts::new(expected, 3).against(opponent(club, period))),
                );
            }
        }
    }

    PlayerFacts::new(Horizon::single(period), clubs(), players).expect("valid pool")
}

/// Pool whose only goalkeepers cost 30.0m each, so no squad fits the budget
pub fn overpriced_keepers_pool(period: Period) -> PlayerFacts {
    let facts = standard_pool(&[period]);
    let players = facts
        .players()
        .iter()
        .cloned()
        .map(|mut p| {
            if p.position == Position::Goalkeeper {
                p.price = 300;
            }
            p
        })
        .collect();
    PlayerFacts::new(facts.horizon(), facts.clubs().cloned().collect(), players)
        .expect("valid pool")
}

/// Pool where every goalkeeper is flagged below the cutoff
pub fn unfit_keepers_pool(period: Period) -> PlayerFacts {
    let facts = standard_pool(&[period]);
    let players = facts
        .players()
        .iter()
        .cloned()
        .map(|mut p| {
            if p.position == Position::Goalkeeper {
                for facts in p.periods.values_mut() {
                    facts.eligibility = Some(25);
                }
            }
            p
        })
        .collect();
    PlayerFacts::new(facts.horizon(), facts.clubs().cloned().collect(), players)
        .expect("valid pool")
}

//! Objective composition
//!
//! Each starter scores `expected_points + (NEUTRAL_DIFFICULTY - difficulty)`.
//! The fixture term is a naive linear proxy (difficulty 1 -> +2 ... 5 -> -2)
//! folded into the same linear form so any MILP backend can consume it. It is
//! a heuristic blend, not a calibrated model.

use crate::error::{OptimizerError, Result};
use crate::model::{LinearExpr, Model, Role};
use player_facts::{PeriodFacts, PlayerFacts};

/// Fixture difficulty that neither helps nor hurts a starter
pub const NEUTRAL_DIFFICULTY: u8 = 3;

/// Objective weight of starting a player with these facts
pub fn lineup_coefficient(facts: &PeriodFacts) -> f64 {
    facts.expected_points + f64::from(NEUTRAL_DIFFICULTY) - f64::from(facts.fixture_difficulty)
}

/// Σ over the model's gameweeks and all players of lineup·coefficient
pub fn compose(facts: &PlayerFacts, model: &Model) -> Result<LinearExpr> {
    let mut objective = LinearExpr::new();
    for &period in model.periods() {
        for player in facts.players() {
            let lineup = model.var(Role::Lineup, player.id, period).ok_or(
                OptimizerError::MissingVariable { role: Role::Lineup, player: player.id, period },
            )?;
            let period_facts = facts.period_facts(player, period)?;
            objective.add_term(lineup, lineup_coefficient(period_facts));
        }
    }
    Ok(objective)
}

//! Result Decoder - assignment back to squads and lineups
//!
//! Membership is read per gameweek from the `(period, player, role)` index of
//! the model, so the same decoder serves single-gameweek and joint models.

use crate::error::{OptimizerError, Result};
use crate::model::{Assignment, Model, Role, VarId};
use crate::objective;
use crate::rules::SquadRules;
use player_facts::{FactsError, Period, Player, PlayerFacts, PlayerId, Position};
use serde::Serialize;

/// A rostered player as shown in a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedPlayer {
    pub player_id: PlayerId,
    pub name: String,
    pub price: u32,
    pub club_name: String,
    pub opponent_club: Option<String>,
    pub starting: bool,
}

/// Squad players of one position, ordered by id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionGroup {
    pub position: Position,
    pub players: Vec<SelectedPlayer>,
}

/// Squad and lineup chosen for one gameweek
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSelection {
    pub period: Period,

    /// Goalkeepers, defenders, midfielders, forwards, in that order
    pub groups: Vec<PositionGroup>,

    /// Squad cost in tenths
    pub total_spend: u32,

    /// Budget ceiling minus spend, in tenths
    pub bank: i64,

    /// Expected points of the starters
    pub projected_points: f64,

    /// Objective value of this gameweek's lineup (difficulty adjusted)
    pub objective_contribution: f64,
}

impl PeriodSelection {
    pub fn squad(&self) -> impl Iterator<Item = &SelectedPlayer> {
        self.groups.iter().flat_map(|g| g.players.iter())
    }

    pub fn lineup(&self) -> impl Iterator<Item = &SelectedPlayer> {
        self.squad().filter(|p| p.starting)
    }

    pub fn squad_ids(&self) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = self.squad().map(|p| p.player_id).collect();
        ids.sort_unstable();
        ids
    }

    pub fn lineup_ids(&self) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = self.lineup().map(|p| p.player_id).collect();
        ids.sort_unstable();
        ids
    }

    pub fn group(&self, position: Position) -> Option<&PositionGroup> {
        self.groups.iter().find(|g| g.position == position)
    }
}

/// Decode the selection of `period` from a solved assignment
pub fn decode(
    facts: &PlayerFacts,
    model: &Model,
    assignment: &Assignment,
    period: Period,
    rules: &SquadRules,
) -> Result<PeriodSelection> {
    if assignment.len() != model.num_variables() {
        return Err(OptimizerError::AssignmentSize {
            expected: model.num_variables(),
            actual: assignment.len(),
        });
    }

    let mut groups: Vec<PositionGroup> =
        Position::ALL.iter().map(|&position| PositionGroup { position, players: Vec::new() }).collect();
    let mut total_spend = 0u32;
    let mut projected_points = 0.0;
    let mut objective_contribution = 0.0;

    // players() is ordered by id, so every group ends up ordered by id too
    for player in facts.players() {
        let in_squad = assignment.value(lookup(model, Role::Squad, player, period)?);
        let starting = assignment.value(lookup(model, Role::Lineup, player, period)?);
        if starting && !in_squad {
            return Err(OptimizerError::InconsistentAssignment { player: player.id, period });
        }
        if !in_squad {
            continue;
        }

        let period_facts = facts.period_facts(player, period)?;
        total_spend += player.price;
        if starting {
            projected_points += period_facts.expected_points;
            objective_contribution += objective::lineup_coefficient(period_facts);
        }

        let club_name = facts
            .club(player.club_id)
            .map(|c| c.name.clone())
            .ok_or(FactsError::UnknownClub { player: player.id, club: player.club_id })?;
        let opponent_club =
            period_facts.opponent.and_then(|id| facts.club(id)).map(|c| c.name.clone());

        // Groups follow Position::ALL, which is element type order
        let group = &mut groups[usize::from(player.position.element_type()) - 1];
        group.players.push(SelectedPlayer {
            player_id: player.id,
            name: player.name.clone(),
            price: player.price,
            club_name,
            opponent_club,
            starting,
        });
    }

    Ok(PeriodSelection {
        period,
        groups,
        total_spend,
        bank: i64::from(rules.budget_ceiling) - i64::from(total_spend),
        projected_points,
        objective_contribution,
    })
}

fn lookup(model: &Model, role: Role, player: &Player, period: Period) -> Result<VarId> {
    model
        .var(role, player.id, period)
        .ok_or(OptimizerError::MissingVariable { role, player: player.id, period })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ModelBuilder;
    use crate::fixtures;

    /// Hand-made assignment: the given squad ids, of which the given ids start
    fn assign(model: &Model, period: Period, squad: &[PlayerId], lineup: &[PlayerId]) -> Assignment {
        let mut values = vec![false; model.num_variables()];
        for &id in squad {
            values[model.var(Role::Squad, id, period).unwrap().index()] = true;
        }
        for &id in lineup {
            values[model.var(Role::Lineup, id, period).unwrap().index()] = true;
        }
        Assignment::new(values)
    }

    #[test]
    fn test_decode_groups_and_figures() {
        let (facts, core) = fixtures::unique_squad_pool(4);
        let rules = SquadRules { club_cap: 4, ..Default::default() };
        let model = ModelBuilder::new(&facts, &rules).build(&[4]).unwrap();
        // 1 GK, 4 DEF, 4 MID, 2 FWD
        let starters = [1, 3, 4, 5, 6, 8, 9, 10, 11, 13, 14];
        let assignment = assign(&model, 4, &core, &starters);

        let selection = decode(&facts, &model, &assignment, 4, &rules).unwrap();
        assert_eq!(selection.period, 4);
        assert_eq!(selection.total_spend, 1000);
        assert_eq!(selection.bank, 0);
        assert_eq!(selection.squad_ids(), core);
        assert_eq!(selection.lineup_ids(), starters.to_vec());

        let positions: Vec<Position> = selection.groups.iter().map(|g| g.position).collect();
        assert_eq!(positions, Position::ALL.to_vec());
        let keepers = selection.group(Position::Goalkeeper).unwrap();
        assert_eq!(keepers.players.len(), 2);
        assert_eq!(keepers.players[0].player_id, 1);
        assert!(keepers.players[0].starting);
        assert!(!keepers.players[1].starting);
        assert_eq!(keepers.players[0].club_name, "ARS");

        let expected: f64 = starters.iter().map(|&id| 2.0 + f64::from(id - 1) * 0.1).sum();
        assert!((selection.projected_points - expected).abs() < 1e-9);
        // Difficulty 3 everywhere, so the adjustment is zero
        assert!((selection.objective_contribution - expected).abs() < 1e-9);
    }

    #[test]
    fn test_decode_reports_opponent_and_bank() {
        let facts = fixtures::standard_pool(&[6]);
        let rules = SquadRules::default();
        let model = ModelBuilder::new(&facts, &rules).build(&[6]).unwrap();
        let assignment = assign(&model, 6, &[1, 2], &[1]);

        let selection = decode(&facts, &model, &assignment, 6, &rules).unwrap();
        assert_eq!(selection.total_spend, 90);
        assert_eq!(selection.bank, 910);
        let keeper = &selection.group(Position::Goalkeeper).unwrap().players[0];
        assert!(keeper.opponent_club.is_some());
        assert_ne!(keeper.opponent_club.as_deref(), Some(keeper.club_name.as_str()));
        assert!(selection.group(Position::Forward).unwrap().players.is_empty());
    }

    #[test]
    fn test_lineup_without_squad_is_inconsistent() {
        let facts = fixtures::standard_pool(&[6]);
        let rules = SquadRules::default();
        let model = ModelBuilder::new(&facts, &rules).build(&[6]).unwrap();
        let assignment = assign(&model, 6, &[1], &[2]);

        let err = decode(&facts, &model, &assignment, 6, &rules).unwrap_err();
        assert!(matches!(err, OptimizerError::InconsistentAssignment { player: 2, period: 6 }));
    }

    #[test]
    fn test_assignment_must_cover_model() {
        let facts = fixtures::standard_pool(&[6]);
        let rules = SquadRules::default();
        let model = ModelBuilder::new(&facts, &rules).build(&[6]).unwrap();

        let err = decode(&facts, &model, &Assignment::new(vec![true; 3]), 6, &rules).unwrap_err();
        assert!(matches!(err, OptimizerError::AssignmentSize { actual: 3, .. }));
    }

    #[test]
    fn test_period_missing_from_model() {
        let facts = fixtures::standard_pool(&[6, 7]);
        let rules = SquadRules::default();
        let model = ModelBuilder::new(&facts, &rules).build(&[6]).unwrap();
        let assignment = Assignment::new(vec![false; model.num_variables()]);

        let err = decode(&facts, &model, &assignment, 7, &rules).unwrap_err();
        assert!(matches!(
            err,
            OptimizerError::MissingVariable { role: Role::Squad, player: 1, period: 7 }
        ));
    }
}

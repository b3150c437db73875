//! Model Builder - decision variables and constraints
//!
//! For every gameweek the builder creates a `squad` and a `lineup` boolean per
//! player and emits the composition rules of that gameweek. Gameweeks never
//! reference each other's variables, so a model over several gameweeks is the
//! per-gameweek encoding applied once per gameweek.

use crate::error::{OptimizerError, Result};
use crate::model::{Comparison, LinearExpr, Model, Role, Rule, Sense, VarId};
use crate::objective;
use crate::rules::SquadRules;
use player_facts::{PeriodFacts, Period, Player, PlayerFacts, Position};
use tracing::debug;

/// Builds models over a read-only fact snapshot
pub struct ModelBuilder<'a> {
    facts: &'a PlayerFacts,
    rules: &'a SquadRules,
}

/// Variables and facts of one player in the gameweek being built
struct Slot<'a> {
    player: &'a Player,
    facts: &'a PeriodFacts,
    squad: VarId,
    lineup: VarId,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(facts: &'a PlayerFacts, rules: &'a SquadRules) -> Self {
        Self { facts, rules }
    }

    /// Build a maximization model covering `periods`
    ///
    /// Fails only on data-integrity problems: a gameweek outside the store's
    /// horizon or a player without facts for a requested gameweek. An empty
    /// or hopeless player pool still yields a well-formed model.
    pub fn build(&self, periods: &[Period]) -> Result<Model> {
        let horizon = self.facts.horizon();
        let mut model = Model::new(Sense::Maximize);

        for &period in periods {
            if !horizon.contains(period) {
                return Err(OptimizerError::PeriodOutsideHorizon { period });
            }
            self.add_period(&mut model, period)?;
        }

        let objective = objective::compose(self.facts, &model)?;
        model.set_objective(objective);

        debug!(
            "Built model for {:?}: {} variables, {} constraints",
            model.periods(),
            model.num_variables(),
            model.num_constraints()
        );
        Ok(model)
    }

    /// Add the variables and constraints of one gameweek
    fn add_period(&self, model: &mut Model, period: Period) -> Result<()> {
        // Resolve every player's facts before touching the model
        let resolved = self
            .facts
            .players()
            .iter()
            .map(|p| self.facts.period_facts(p, period).map(|f| (p, f)))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        model.add_period(period);
        let slots: Vec<Slot<'_>> = resolved
            .into_iter()
            .map(|(player, facts)| Slot {
                player,
                facts,
                squad: model.add_variable(player.id, period, Role::Squad),
                lineup: model.add_variable(player.id, period, Role::Lineup),
            })
            .collect();

        self.add_squad_rules(model, period, &slots);
        self.add_lineup_rules(model, period, &slots);
        self.add_club_caps(model, period, &slots);
        self.add_player_links(model, period, &slots);
        Ok(())
    }

    fn add_squad_rules(&self, model: &mut Model, period: Period, slots: &[Slot<'_>]) {
        let rules = self.rules;

        model.add_constraint(
            Rule::SquadSize,
            period,
            LinearExpr::sum(slots.iter().map(|s| s.squad)),
            Comparison::Eq,
            f64::from(rules.squad_size),
        );

        let spend = LinearExpr::weighted(slots.iter().map(|s| (s.squad, f64::from(s.player.price))));
        if let Some(floor) = rules.active_budget_floor() {
            model.add_constraint(
                Rule::BudgetFloor,
                period,
                spend.clone(),
                Comparison::Ge,
                f64::from(floor),
            );
        }
        model.add_constraint(
            Rule::BudgetCeiling,
            period,
            spend,
            Comparison::Le,
            f64::from(rules.budget_ceiling),
        );

        for (position, quota) in rules.squad_quotas.iter() {
            model.add_constraint(
                Rule::SquadQuota(position),
                period,
                LinearExpr::sum(at(slots, position).map(|s| s.squad)),
                Comparison::Eq,
                f64::from(quota),
            );
        }
    }

    fn add_lineup_rules(&self, model: &mut Model, period: Period, slots: &[Slot<'_>]) {
        let rules = self.rules;

        model.add_constraint(
            Rule::LineupSize,
            period,
            LinearExpr::sum(slots.iter().map(|s| s.lineup)),
            Comparison::Eq,
            f64::from(rules.lineup_size),
        );

        for (position, range) in rules.lineup_ranges.iter() {
            let starters = LinearExpr::sum(at(slots, position).map(|s| s.lineup));
            if range.is_exact() {
                model.add_constraint(
                    Rule::LineupExact(position),
                    period,
                    starters,
                    Comparison::Eq,
                    f64::from(range.min),
                );
            } else {
                model.add_constraint(
                    Rule::LineupMin(position),
                    period,
                    starters.clone(),
                    Comparison::Ge,
                    f64::from(range.min),
                );
                model.add_constraint(
                    Rule::LineupMax(position),
                    period,
                    starters,
                    Comparison::Le,
                    f64::from(range.max),
                );
            }
        }
    }

    fn add_club_caps(&self, model: &mut Model, period: Period, slots: &[Slot<'_>]) {
        for club in self.facts.clubs() {
            let members = slots.iter().filter(|s| s.player.club_id == club.id).map(|s| s.squad);
            model.add_constraint(
                Rule::ClubCap(club.id),
                period,
                LinearExpr::sum(members),
                Comparison::Le,
                f64::from(self.rules.club_cap),
            );
        }
    }

    fn add_player_links(&self, model: &mut Model, period: Period, slots: &[Slot<'_>]) {
        let cutoff = self.rules.active_eligibility_cutoff();

        for slot in slots {
            // lineup - squad <= 0
            let mut link = LinearExpr::sum([slot.lineup]);
            link.add_term(slot.squad, -1.0);
            model.add_constraint(
                Rule::LineupRequiresSquad(slot.player.id),
                period,
                link,
                Comparison::Le,
                0.0,
            );

            // Squad membership stays open for doubtful players; only starting is cut
            if let (Some(cutoff), Some(chance)) = (cutoff, slot.facts.eligibility) {
                if chance < cutoff {
                    model.add_constraint(
                        Rule::Unavailable(slot.player.id),
                        period,
                        LinearExpr::sum([slot.lineup]),
                        Comparison::Eq,
                        0.0,
                    );
                }
            }
        }
    }
}

fn at<'s, 'a>(slots: &'s [Slot<'a>], position: Position) -> impl Iterator<Item = &'s Slot<'a>> {
    slots.iter().filter(move |s| s.player.position == position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use player_facts::FactsError;

    fn count(model: &Model, rule: Rule) -> usize {
        model.constraints().iter().filter(|c| c.rule == rule).count()
    }

    #[test]
    fn test_single_period_shape() {
        let facts = fixtures::standard_pool(&[6]);
        let rules = SquadRules::default();
        let model = ModelBuilder::new(&facts, &rules).build(&[6]).unwrap();

        let players = facts.len();
        let clubs = facts.clubs().count();
        assert_eq!(model.num_variables(), players * 2);
        // size, ceiling, floor, 4 quotas, lineup size, GK exact, 3 x (min, max)
        let fixed = 1 + 1 + 1 + 4 + 1 + 1 + 6;
        let doubtful = fixtures::doubtful_players(&facts, 6, rules.eligibility_cutoff);
        assert_eq!(model.num_constraints(), fixed + clubs + players + doubtful);
        assert_eq!(model.periods(), &[6]);
        assert_eq!(count(&model, Rule::LineupExact(Position::Goalkeeper)), 1);
        assert_eq!(count(&model, Rule::LineupMin(Position::Goalkeeper)), 0);
        assert_eq!(count(&model, Rule::LineupMax(Position::Defender)), 1);
    }

    #[test]
    fn test_quota_and_budget_bounds() {
        let facts = fixtures::standard_pool(&[6]);
        let rules = SquadRules::default();
        let model = ModelBuilder::new(&facts, &rules).build(&[6]).unwrap();

        let ceiling = model.constraints().iter().find(|c| c.rule == Rule::BudgetCeiling).unwrap();
        assert_eq!(ceiling.cmp, Comparison::Le);
        assert_eq!(ceiling.rhs, 1000.0);
        let first = &facts.players()[0];
        let squad = model.var(Role::Squad, first.id, 6).unwrap();
        assert_eq!(ceiling.expr.coefficient(squad), f64::from(first.price));

        let floor = model.constraints().iter().find(|c| c.rule == Rule::BudgetFloor).unwrap();
        assert_eq!(floor.cmp, Comparison::Ge);
        assert_eq!(floor.rhs, 970.0);

        let gk = model
            .constraints()
            .iter()
            .find(|c| c.rule == Rule::SquadQuota(Position::Goalkeeper))
            .unwrap();
        assert_eq!(gk.rhs, 2.0);
        assert_eq!(gk.expr.len(), facts.players_at(Position::Goalkeeper).count());
    }

    #[test]
    fn test_toggled_rules_are_not_emitted() {
        let facts = fixtures::standard_pool(&[6]);
        let rules = SquadRules::default().without_budget_floor().without_eligibility();
        let model = ModelBuilder::new(&facts, &rules).build(&[6]).unwrap();

        assert_eq!(count(&model, Rule::BudgetFloor), 0);
        assert!(model.constraints().iter().all(|c| !matches!(c.rule, Rule::Unavailable(_))));
        assert_eq!(count(&model, Rule::BudgetCeiling), 1);
    }

    #[test]
    fn test_eligibility_only_restricts_lineup() {
        let facts = fixtures::standard_pool(&[6]);
        let rules = SquadRules::default();
        let model = ModelBuilder::new(&facts, &rules).build(&[6]).unwrap();

        let injured = fixtures::INJURED_FORWARD;
        let constraint = model
            .constraints()
            .iter()
            .find(|c| c.rule == Rule::Unavailable(injured))
            .expect("doubtful player is cut from the lineup");
        let lineup = model.var(Role::Lineup, injured, 6).unwrap();
        let squad = model.var(Role::Squad, injured, 6).unwrap();
        assert_eq!(constraint.expr.terms(), &[(lineup, 1.0)]);
        assert_eq!(constraint.cmp, Comparison::Eq);
        assert_eq!(constraint.rhs, 0.0);
        assert!(model
            .constraints()
            .iter()
            .filter(|c| c.rule == Rule::Unavailable(injured))
            .all(|c| c.expr.coefficient(squad) == 0.0));
    }

    #[test]
    fn test_club_cap_per_club() {
        let facts = fixtures::standard_pool(&[6]);
        let rules = SquadRules { club_cap: 2, ..Default::default() };
        let model = ModelBuilder::new(&facts, &rules).build(&[6]).unwrap();

        for club in facts.clubs() {
            let cap = model.constraints().iter().find(|c| c.rule == Rule::ClubCap(club.id)).unwrap();
            assert_eq!(cap.rhs, 2.0);
            assert_eq!(cap.expr.len(), facts.players_of(club.id).count());
        }
    }

    #[test]
    fn test_objective_uses_lineup_variables() {
        let facts = fixtures::standard_pool(&[6]);
        let rules = SquadRules::default();
        let model = ModelBuilder::new(&facts, &rules).build(&[6]).unwrap();

        assert_eq!(model.objective().len(), facts.len());
        for player in facts.players() {
            let lineup = model.var(Role::Lineup, player.id, 6).unwrap();
            let squad = model.var(Role::Squad, player.id, 6).unwrap();
            let expected = objective::lineup_coefficient(player.period(6).unwrap());
            assert_eq!(model.objective().coefficient(lineup), expected);
            assert_eq!(model.objective().coefficient(squad), 0.0);
        }
    }

    #[test]
    fn test_multi_period_repeats_per_period_encoding() {
        let facts = fixtures::standard_pool(&[6, 7]);
        let rules = SquadRules::default();
        let builder = ModelBuilder::new(&facts, &rules);
        let single = builder.build(&[6]).unwrap();
        let joint = builder.build(&[6, 7]).unwrap();

        assert_eq!(joint.num_variables(), single.num_variables() * 2);
        assert_eq!(joint.constraints_for(6).count(), single.num_constraints());
        assert_eq!(joint.constraints_for(7).count(), single.num_constraints());
        assert_eq!(joint.objective().len(), facts.len() * 2);
        assert_ne!(joint.var(Role::Squad, 1, 6), joint.var(Role::Squad, 1, 7));
    }

    #[test]
    fn test_missing_period_facts_is_data_integrity_error() {
        let facts = fixtures::standard_pool(&[6]);
        let facts = fixtures::with_horizon(&facts, 6, 7);
        let rules = SquadRules::default();
        let err = ModelBuilder::new(&facts, &rules).build(&[6, 7]).unwrap_err();

        match err {
            OptimizerError::Facts(FactsError::MissingPeriodFacts { period, .. }) => {
                assert_eq!(period, 7)
            }
            other => panic!("expected missing facts, got {other:?}"),
        }
    }

    #[test]
    fn test_period_outside_horizon() {
        let facts = fixtures::standard_pool(&[6]);
        let rules = SquadRules::default();
        let err = ModelBuilder::new(&facts, &rules).build(&[9]).unwrap_err();
        assert!(matches!(err, OptimizerError::PeriodOutsideHorizon { period: 9 }));
    }

    #[test]
    fn test_empty_pool_still_builds() {
        let facts = fixtures::empty_pool(6);
        let rules = SquadRules::default();
        let model = ModelBuilder::new(&facts, &rules).build(&[6]).unwrap();

        assert_eq!(model.num_variables(), 0);
        assert!(model.objective().is_empty());
        assert!(model.constraints().iter().any(|c| c.rule == Rule::SquadSize && c.expr.is_empty()));
    }
}

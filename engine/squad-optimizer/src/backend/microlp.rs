use super::{Backend, SolveOutcome, SolveStatus, SolverStats};
use crate::error::Result;
use crate::model::{Assignment, Comparison, Constraint, LinearExpr, Model, Sense};
use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use std::time::Instant;
use tracing::{debug, warn};

/// Values above this are read as 1
const ROUNDING_THRESHOLD: f64 = 0.5;

/// Pure-Rust branch-and-bound MILP backend (`microlp` through `good_lp`)
///
/// microlp does not expose search counters, so conflicts and branches are
/// reported as `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpBackend;

impl MicroLpBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for MicroLpBackend {
    fn name(&self) -> &str {
        "microlp"
    }

    fn solve(&self, model: &Model) -> Result<SolveOutcome> {
        let started = Instant::now();
        let stats = |started: Instant| SolverStats {
            conflicts: None,
            branches: None,
            wall_time: started.elapsed(),
        };

        // Constraints without variables are decided here: the solver gets
        // nothing to branch on and some backends reject empty rows.
        let (constant, active): (Vec<&Constraint>, Vec<&Constraint>) =
            model.constraints().iter().partition(|c| c.expr.is_empty());
        let empty = Assignment::new(vec![false; model.num_variables()]);
        if let Some(violated) = constant.iter().find(|c| !c.is_satisfied_by(&empty)) {
            debug!("Constant constraint cannot hold: {}", violated);
            return Ok(SolveOutcome::unsolved(SolveStatus::Infeasible, stats(started)));
        }
        if model.num_variables() == 0 {
            return Ok(SolveOutcome::solved(SolveStatus::Optimal, model, empty, stats(started)));
        }

        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = model
            .variables()
            .iter()
            .map(|v| vars.add(variable().binary().name(v.name())))
            .collect();

        let objective = to_expression(model.objective(), &handles);
        let unsolved = match model.sense() {
            Sense::Maximize => vars.maximise(objective),
            Sense::Minimize => vars.minimise(objective),
        };
        let mut problem = unsolved.using(microlp);
        for c in active {
            let lhs = to_expression(&c.expr, &handles);
            // Constant part of the expression moves to the bound
            let rhs = c.rhs - c.expr.constant();
            let row = match c.cmp {
                Comparison::Eq => constraint::eq(lhs, rhs),
                Comparison::Le => constraint::leq(lhs, rhs),
                Comparison::Ge => constraint::geq(lhs, rhs),
            };
            problem = problem.with(row);
        }

        match problem.solve() {
            Ok(solution) => {
                let values =
                    handles.iter().map(|&h| solution.value(h) > ROUNDING_THRESHOLD).collect();
                let assignment = Assignment::new(values);
                let violations = model.violations(&assignment);
                if !violations.is_empty() {
                    // Rounding broke a row; the result is not a usable assignment.
                    warn!(
                        "microlp returned {} violated constraints after rounding, first: {}",
                        violations.len(),
                        violations[0]
                    );
                    return Ok(SolveOutcome::unsolved(SolveStatus::Unknown, stats(started)));
                }
                Ok(SolveOutcome::solved(SolveStatus::Optimal, model, assignment, stats(started)))
            }
            Err(ResolutionError::Infeasible) => {
                Ok(SolveOutcome::unsolved(SolveStatus::Infeasible, stats(started)))
            }
            Err(err) => {
                warn!("microlp stopped without a solution: {}", err);
                Ok(SolveOutcome::unsolved(SolveStatus::Unknown, stats(started)))
            }
        }
    }
}

/// Variable terms only; callers account for the constant
fn to_expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    expr.terms().iter().map(|&(var, coeff)| coeff * handles[var.index()]).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, Rule, VarId};

    fn pick_two_of_three() -> Model {
        let mut model = Model::new(Sense::Maximize);
        model.add_period(1);
        let vars: Vec<VarId> = (1..=3).map(|p| model.add_variable(p, 1, Role::Squad)).collect();
        model.add_constraint(Rule::SquadSize, 1, LinearExpr::sum(vars.clone()), Comparison::Eq, 2.0);
        model.set_objective(LinearExpr::weighted([(vars[0], 1.0), (vars[1], 5.0), (vars[2], 3.0)]));
        model
    }

    #[test]
    fn test_solves_small_model() {
        let model = pick_two_of_three();
        let outcome = MicroLpBackend::new().solve(&model).unwrap();

        assert_eq!(outcome.status, SolveStatus::Optimal);
        let assignment = outcome.assignment.unwrap();
        assert_eq!(assignment.selected().collect::<Vec<_>>(), vec![VarId(1), VarId(2)]);
        assert_eq!(outcome.objective_value, Some(8.0));
        assert_eq!(outcome.stats.branches, None);
    }

    #[test]
    fn test_reports_infeasible_model() {
        let mut model = pick_two_of_three();
        let all = LinearExpr::sum(model.variables().iter().map(|v| v.id).collect::<Vec<_>>());
        model.add_constraint(Rule::LineupSize, 1, all, Comparison::Ge, 3.0);
        model.add_constraint(Rule::BudgetCeiling, 1, LinearExpr::sum([VarId(0)]), Comparison::Le, 0.0);

        let outcome = MicroLpBackend::new().solve(&model).unwrap();
        assert!(!outcome.status.is_solved());
        assert!(outcome.assignment.is_none());
        assert!(outcome.objective_value.is_none());
    }

    #[test]
    fn test_constant_rows_are_decided_without_solver() {
        let mut model = Model::new(Sense::Maximize);
        model.add_constraint(Rule::SquadSize, 1, LinearExpr::new(), Comparison::Eq, 15.0);
        let outcome = MicroLpBackend::new().solve(&model).unwrap();
        assert_eq!(outcome.status, SolveStatus::Infeasible);

        let mut model = Model::new(Sense::Maximize);
        model.add_constraint(Rule::ClubCap(1), 1, LinearExpr::new(), Comparison::Le, 3.0);
        let outcome = MicroLpBackend::new().solve(&model).unwrap();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(outcome.objective_value, Some(0.0));
    }
}

//! Build, solve and decode over a horizon

use crate::backend::{Backend, SolveOutcome, SolveStatus};
use crate::builder::ModelBuilder;
use crate::decoder::{self, PeriodSelection};
use crate::error::Result;
use crate::model::Model;
use crate::rules::SquadRules;
use player_facts::{Period, PlayerFacts};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// How a horizon is handed to the backend
///
/// Gameweeks share no constraints, so both modes select the same squads; they
/// differ in how failures are scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HorizonMode {
    /// One model and one backend call per gameweek
    #[default]
    PerPeriod,
    /// One model covering every gameweek; a single status for all of them
    Joint,
}

impl fmt::Display for HorizonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HorizonMode::PerPeriod => f.write_str("per-period"),
            HorizonMode::Joint => f.write_str("joint"),
        }
    }
}

impl FromStr for HorizonMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-period" | "per_period" | "period" => Ok(HorizonMode::PerPeriod),
            "joint" => Ok(HorizonMode::Joint),
            other => Err(format!("unknown horizon mode '{other}' (expected per-period or joint)")),
        }
    }
}

/// Backend verdict and search statistics for one gameweek
///
/// In joint mode every gameweek carries the statistics of the shared solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverDiagnostics {
    pub backend: String,
    pub status: SolveStatus,
    pub objective_value: Option<f64>,
    pub conflicts: Option<u64>,
    pub branches: Option<u64>,
    pub wall_time: Duration,
}

impl SolverDiagnostics {
    fn from_outcome(backend: &str, outcome: &SolveOutcome) -> Self {
        Self {
            backend: backend.to_string(),
            status: outcome.status,
            objective_value: outcome.objective_value,
            conflicts: outcome.stats.conflicts,
            branches: outcome.stats.branches,
            wall_time: outcome.stats.wall_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub period: Period,
    pub diagnostics: SolverDiagnostics,
    pub num_variables: usize,
    pub num_constraints: usize,

    /// `None` when the backend found no assignment
    pub selection: Option<PeriodSelection>,
}

impl PeriodReport {
    pub fn is_solved(&self) -> bool {
        self.selection.is_some()
    }
}

/// Everything produced by one optimization run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    pub backend: String,
    pub mode: HorizonMode,
    pub periods: Vec<PeriodReport>,
}

impl OptimizationReport {
    /// Sum of the solved gameweeks' objective contributions
    pub fn total_objective(&self) -> f64 {
        self.periods
            .iter()
            .filter_map(|p| p.selection.as_ref())
            .map(|s| s.objective_contribution)
            .sum()
    }

    pub fn all_solved(&self) -> bool {
        self.periods.iter().all(PeriodReport::is_solved)
    }

    pub fn period(&self, period: Period) -> Option<&PeriodReport> {
        self.periods.iter().find(|p| p.period == period)
    }
}

/// Runs the builder, a backend and the decoder over a fact snapshot
pub struct SquadOptimizer {
    backend: Box<dyn Backend>,
    rules: SquadRules,
    mode: HorizonMode,
}

impl SquadOptimizer {
    pub fn new(backend: Box<dyn Backend>, rules: SquadRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self { backend, rules, mode: HorizonMode::default() })
    }

    pub fn with_mode(mut self, mode: HorizonMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn rules(&self) -> &SquadRules {
        &self.rules
    }

    pub fn mode(&self) -> HorizonMode {
        self.mode
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Optimize every gameweek of the store's horizon
    pub fn optimize(&self, facts: &PlayerFacts) -> Result<OptimizationReport> {
        let periods: Vec<Period> = facts.horizon().periods().collect();
        self.optimize_periods(facts, &periods)
    }

    /// Optimize the listed gameweeks
    ///
    /// Every model is built before the first solve, so a data-integrity
    /// error ends the run without any report.
    pub fn optimize_periods(
        &self,
        facts: &PlayerFacts,
        periods: &[Period],
    ) -> Result<OptimizationReport> {
        let builder = ModelBuilder::new(facts, &self.rules);
        let models: Vec<(Vec<Period>, Model)> = match self.mode {
            HorizonMode::PerPeriod => periods
                .iter()
                .map(|&period| builder.build(&[period]).map(|model| (vec![period], model)))
                .collect::<Result<_>>()?,
            HorizonMode::Joint if periods.is_empty() => Vec::new(),
            HorizonMode::Joint => vec![(periods.to_vec(), builder.build(periods)?)],
        };

        let backend = self.backend.name();
        let mut reports = Vec::with_capacity(periods.len());
        for (covered, model) in &models {
            info!(
                "Solving {:?} with {}: {} variables, {} constraints",
                covered,
                backend,
                model.num_variables(),
                model.num_constraints()
            );
            let outcome = self.backend.solve(model)?;
            let diagnostics = SolverDiagnostics::from_outcome(backend, &outcome);

            match (&outcome.assignment, outcome.status.is_solved()) {
                (Some(_), true) => info!(
                    "{:?}: {} objective {:.2} in {:?}",
                    covered,
                    outcome.status,
                    outcome.objective_value.unwrap_or_default(),
                    outcome.stats.wall_time
                ),
                _ => warn!("{:?}: {}, no squad selected", covered, outcome.status),
            }

            for &period in covered {
                let selection = match (&outcome.assignment, outcome.status.is_solved()) {
                    (Some(assignment), true) => {
                        Some(decoder::decode(facts, model, assignment, period, &self.rules)?)
                    }
                    _ => None,
                };
                reports.push(PeriodReport {
                    period,
                    diagnostics: diagnostics.clone(),
                    num_variables: model.num_variables(),
                    num_constraints: model.num_constraints(),
                    selection,
                });
            }
        }

        Ok(OptimizationReport { backend: backend.to_string(), mode: self.mode, periods: reports })
    }
}

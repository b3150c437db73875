//! Backend-neutral optimization model
//!
//! A [`Model`] is a list of boolean variables, a list of linear constraints
//! over them and one linear objective. Nothing here knows how a solver works;
//! backends translate the model into their own representation.

use player_facts::{ClubId, Period, PlayerId, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Tolerance used when checking constraints against an assignment
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Index of a variable inside its model
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub u32);

impl VarId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a boolean variable decides
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Player holds one of the squad slots
    Squad,
    /// Player is in the starting lineup
    Lineup,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Squad => f.write_str("squad"),
            Role::Lineup => f.write_str("lineup"),
        }
    }
}

/// A boolean decision variable
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub id: VarId,
    pub player: PlayerId,
    pub period: Period,
    pub role: Role,
}

impl Variable {
    /// Stable, human readable name (e.g., "squad_302_gw6")
    pub fn name(&self) -> String {
        format!("{}_{}_gw{}", self.role, self.player, self.period)
    }
}

/// Σ coeff·var + constant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of `vars`, each with coefficient 1
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        Self { terms: vars.into_iter().map(|v| (v, 1.0)).collect(), constant: 0.0 }
    }

    /// Weighted sum of `(var, coeff)` pairs
    pub fn weighted(terms: impl IntoIterator<Item = (VarId, f64)>) -> Self {
        Self { terms: terms.into_iter().collect(), constant: 0.0 }
    }

    pub fn add_term(&mut self, var: VarId, coeff: f64) {
        self.terms.push((var, coeff));
    }

    pub fn add_constant(&mut self, value: f64) {
        self.constant += value;
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Coefficient of `var`, summing repeated terms
    pub fn coefficient(&self, var: VarId) -> f64 {
        self.terms.iter().filter(|(v, _)| *v == var).map(|(_, c)| c).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn evaluate(&self, assignment: &Assignment) -> f64 {
        self.terms
            .iter()
            .filter(|(v, _)| assignment.value(*v))
            .map(|(_, c)| c)
            .sum::<f64>()
            + self.constant
    }
}

/// Relation between a constraint's expression and its bound
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Le,
    Ge,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Eq => f.write_str("=="),
            Comparison::Le => f.write_str("<="),
            Comparison::Ge => f.write_str(">="),
        }
    }
}

/// Domain rule a constraint encodes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    SquadSize,
    BudgetCeiling,
    BudgetFloor,
    SquadQuota(Position),
    LineupSize,
    LineupExact(Position),
    LineupMin(Position),
    LineupMax(Position),
    ClubCap(ClubId),
    LineupRequiresSquad(PlayerId),
    Unavailable(PlayerId),
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::SquadSize => write!(f, "squad size"),
            Rule::BudgetCeiling => write!(f, "budget ceiling"),
            Rule::BudgetFloor => write!(f, "budget floor"),
            Rule::SquadQuota(p) => write!(f, "{p} squad quota"),
            Rule::LineupSize => write!(f, "lineup size"),
            Rule::LineupExact(p) => write!(f, "{p} starters"),
            Rule::LineupMin(p) => write!(f, "{p} minimum starters"),
            Rule::LineupMax(p) => write!(f, "{p} maximum starters"),
            Rule::ClubCap(c) => write!(f, "club {c} cap"),
            Rule::LineupRequiresSquad(p) => write!(f, "player {p} starts only from the squad"),
            Rule::Unavailable(p) => write!(f, "player {p} unavailable"),
        }
    }
}

/// `expr cmp rhs`, tagged with the rule and gameweek it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub rule: Rule,
    pub period: Period,
    pub expr: LinearExpr,
    pub cmp: Comparison,
    pub rhs: f64,
}

impl Constraint {
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        let lhs = self.expr.evaluate(assignment);
        match self.cmp {
            Comparison::Eq => (lhs - self.rhs).abs() <= FEASIBILITY_TOLERANCE,
            Comparison::Le => lhs <= self.rhs + FEASIBILITY_TOLERANCE,
            Comparison::Ge => lhs >= self.rhs - FEASIBILITY_TOLERANCE,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GW{} {}: {} terms {} {}",
            self.period,
            self.rule,
            self.expr.len(),
            self.cmp,
            self.rhs
        )
    }
}

/// Optimization direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sense {
    Maximize,
    Minimize,
}

/// Variables, constraints and objective for one solve call
#[derive(Debug, Clone)]
pub struct Model {
    variables: Vec<Variable>,
    index: HashMap<(Period, PlayerId, Role), VarId>,
    constraints: Vec<Constraint>,
    objective: LinearExpr,
    sense: Sense,
    periods: Vec<Period>,
}

impl Model {
    pub fn new(sense: Sense) -> Self {
        Self {
            variables: Vec::new(),
            index: HashMap::new(),
            constraints: Vec::new(),
            objective: LinearExpr::new(),
            sense,
            periods: Vec::new(),
        }
    }

    /// Register a gameweek as covered by this model
    pub fn add_period(&mut self, period: Period) {
        if !self.periods.contains(&period) {
            self.periods.push(period);
        }
    }

    /// Create a fresh variable, or return the existing one for the same key
    pub fn add_variable(&mut self, player: PlayerId, period: Period, role: Role) -> VarId {
        if let Some(&id) = self.index.get(&(period, player, role)) {
            return id;
        }
        let id = VarId(self.variables.len() as u32);
        self.variables.push(Variable { id, player, period, role });
        self.index.insert((period, player, role), id);
        id
    }

    pub fn var(&self, role: Role, player: PlayerId, period: Period) -> Option<VarId> {
        self.index.get(&(period, player, role)).copied()
    }

    pub fn add_constraint(
        &mut self,
        rule: Rule,
        period: Period,
        expr: LinearExpr,
        cmp: Comparison,
        rhs: f64,
    ) {
        self.constraints.push(Constraint { rule, period, expr, cmp, rhs });
    }

    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id.index())
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Constraints emitted for `period`
    pub fn constraints_for(&self, period: Period) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter().filter(move |c| c.period == period)
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Constraints the assignment violates
    pub fn violations<'a>(&'a self, assignment: &'a Assignment) -> Vec<&'a Constraint> {
        self.constraints.iter().filter(|c| !c.is_satisfied_by(assignment)).collect()
    }
}

/// A 0/1 value for every variable of a model, indexed by [`VarId`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<bool>,
}

impl Assignment {
    pub fn new(values: Vec<bool>) -> Self {
        Self { values }
    }

    /// Value of `var`; variables outside the assignment read as 0
    pub fn value(&self, var: VarId) -> bool {
        self.values.get(var.index()).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Variables set to 1
    pub fn selected(&self) -> impl Iterator<Item = VarId> + '_ {
        self.values.iter().enumerate().filter(|(_, v)| **v).map(|(i, _)| VarId(i as u32))
    }
}

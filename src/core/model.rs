use serde::{Deserialize, Serialize};

/// Absolute slack allowed when checking a constraint.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-9;

/// Index of a binary decision variable.
pub type Variable = usize;

/// Sparse linear combination of binary variables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearExpression {
    pub terms: Vec<(Variable, f64)>,
}

impl FromIterator<(Variable, f64)> for LinearExpression {
    fn from_iter<T: IntoIterator<Item = (Variable, f64)>>(iter: T) -> Self {
        Self { terms: iter.into_iter().collect() }
    }
}

impl LinearExpression {
    #[must_use]
    pub fn evaluate(&self, assignment: &[bool]) -> f64 {
        self.terms
            .iter()
            .filter(|(variable, _)| assignment[*variable])
            .map(|(_, coefficient)| coefficient)
            .sum()
    }

    /// Dense coefficient vector, repeated variables are summed up.
    #[must_use]
    pub fn to_dense(&self, n_variables: usize) -> Vec<f64> {
        let mut coefficients = vec![0.0; n_variables];
        for (variable, coefficient) in &self.terms {
            coefficients[*variable] += coefficient;
        }
        coefficients
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Sense {
    #[display("<=")]
    Le,

    #[display("==")]
    Eq,

    #[display(">=")]
    Ge,
}

impl Sense {
    /// Violation amount of `lhs <sense> rhs`, zero when satisfied.
    #[must_use]
    pub fn violation(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Le => (lhs - rhs).max(0.0),
            Self::Ge => (rhs - lhs).max(0.0),
            Self::Eq => (lhs - rhs).abs(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub label: String,
    pub lhs: LinearExpression,
    pub sense: Sense,
    pub rhs: f64,
}

impl Constraint {
    #[must_use]
    pub fn violation_at(&self, lhs: f64) -> f64 {
        self.sense.violation(lhs, self.rhs)
    }

    #[must_use]
    pub fn violation(&self, assignment: &[bool]) -> f64 {
        self.violation_at(self.lhs.evaluate(assignment))
    }

    #[must_use]
    pub fn is_satisfied(&self, assignment: &[bool]) -> bool {
        self.violation(assignment) <= FEASIBILITY_TOLERANCE
    }
}

/// Constrained binary model: minimize the objective subject to the labelled constraints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    n_variables: usize,
    objective: LinearExpression,
    constraints: Vec<Constraint>,
}

impl Model {
    pub const fn new(n_variables: usize, objective: LinearExpression) -> Self {
        Self { n_variables, objective, constraints: Vec::new() }
    }

    #[must_use]
    pub fn with_constraint(
        mut self,
        label: impl Into<String>,
        lhs: LinearExpression,
        sense: Sense,
        rhs: f64,
    ) -> Self {
        self.constraints.push(Constraint { label: label.into(), lhs, sense, rhs });
        self
    }

    #[must_use]
    pub const fn n_variables(&self) -> usize {
        self.n_variables
    }

    #[must_use]
    pub const fn objective(&self) -> &LinearExpression {
        &self.objective
    }

    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Objective value of the assignment.
    #[must_use]
    pub fn energy(&self, assignment: &[bool]) -> f64 {
        self.objective.evaluate(assignment)
    }

    #[must_use]
    pub fn total_violation(&self, assignment: &[bool]) -> f64 {
        self.constraints.iter().map(|constraint| constraint.violation(assignment)).sum()
    }

    #[must_use]
    pub fn is_feasible(&self, assignment: &[bool]) -> bool {
        self.constraints.iter().all(|constraint| constraint.is_satisfied(assignment))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn model() -> Model {
        let capacity = [(0, 5.0), (1, 5.0), (2, 10.0)].into_iter().collect();
        let count = [(0, 1.0), (1, 1.0), (2, 1.0)].into_iter().collect();
        Model::new(3, [(0, -1.0), (1, -2.0), (2, -3.0)].into_iter().collect())
            .with_constraint("cap", capacity, Sense::Le, 10.0)
            .with_constraint("count", count, Sense::Eq, 2.0)
    }

    #[test]
    fn test_energy() {
        assert_abs_diff_eq!(model().energy(&[true, false, true]), -4.0);
        assert_abs_diff_eq!(model().energy(&[false, false, false]), 0.0);
    }

    #[test]
    fn test_feasible() {
        assert!(model().is_feasible(&[true, true, false]));
    }

    #[test]
    fn test_capacity_violated() {
        let model = model();
        let assignment = [true, false, true];
        assert!(!model.is_feasible(&assignment));
        let [capacity, count] = model.constraints() else { panic!("expected two constraints") };
        assert_abs_diff_eq!(capacity.violation(&assignment), 5.0);
        assert!(count.is_satisfied(&assignment));
    }

    #[test]
    fn test_equality_violated_both_ways() {
        let model = model();
        assert_abs_diff_eq!(model.total_violation(&[true, false, false]), 1.0);
        assert_abs_diff_eq!(model.total_violation(&[true, true, true]), 11.0);
    }

    #[test]
    fn test_greater_or_equal() {
        let constraint = Constraint {
            label: "at_least".to_owned(),
            lhs: LinearExpression::default(),
            sense: Sense::Ge,
            rhs: 3.0,
        };
        assert_abs_diff_eq!(constraint.violation_at(1.0), 2.0);
        assert_abs_diff_eq!(constraint.violation_at(4.0), 0.0);
    }

    #[test]
    fn test_to_dense_sums_repeated_terms() {
        let expression: LinearExpression = [(1, 2.0), (1, 0.5), (0, -1.0)].into_iter().collect();
        assert_eq!(expression.to_dense(3), [-1.0, 2.5, 0.0]);
    }

    #[test]
    fn test_sense_display() {
        assert_eq!(Sense::Le.to_string(), "<=");
        assert_eq!(Sense::Eq.to_string(), "==");
    }

    #[test]
    fn test_serialize_ok() -> crate::prelude::Result {
        let json = serde_json::to_value(model())?;
        assert_eq!(json["n_variables"], 3);
        assert_eq!(json["constraints"][1]["label"], "count");
        assert_eq!(json["constraints"][1]["sense"], "eq");
        assert_eq!(json["objective"]["terms"][2], serde_json::json!([2, -3.0]));
        Ok(())
    }
}

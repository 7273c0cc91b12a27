mod anneal;
mod branch_and_bound;
mod remote;

pub use self::{anneal::Annealing, branch_and_bound::BranchAndBound, remote::Remote};
use crate::{
    core::{
        model::{Model, Sense},
        sample::SampleSet,
    },
    prelude::*,
};

/// Anything that accepts a model and returns feasibility-annotated samples.
pub trait Sampler {
    /// Submit the model under a human-readable label.
    ///
    /// The samples come in the sampler-defined order.
    fn sample(&self, model: &Model, label: &str) -> Result<SampleSet>;
}

/// Dense view of a model, shared by the local samplers.
struct DenseModel {
    objective: Vec<f64>,
    constraints: Vec<DenseConstraint>,
}

struct DenseConstraint {
    coefficients: Vec<f64>,
    sense: Sense,
    rhs: f64,
}

impl DenseModel {
    fn new(model: &Model) -> Self {
        let n_variables = model.n_variables();
        Self {
            objective: model.objective().to_dense(n_variables),
            constraints: model
                .constraints()
                .iter()
                .map(|constraint| DenseConstraint {
                    coefficients: constraint.lhs.to_dense(n_variables),
                    sense: constraint.sense,
                    rhs: constraint.rhs,
                })
                .collect(),
        }
    }

    const fn n_variables(&self) -> usize {
        self.objective.len()
    }
}

impl DenseConstraint {
    fn violation_at(&self, lhs: f64) -> f64 {
        self.sense.violation(lhs, self.rhs)
    }
}

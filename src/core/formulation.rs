use bon::Builder;
use serde::Serialize;

use crate::{
    core::{
        model::{LinearExpression, Model, Sense},
        package::Package,
    },
    prelude::*,
};

pub const CAPACITY_LABEL: &str = "max_weight";
pub const COUNT_LABEL: &str = "max_packages";

/// Truck limits.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Builder)]
pub struct Limits {
    /// Maximum total weight of the shipped packages.
    pub max_weight: f64,

    /// Exact number of packages to ship.
    pub max_packages: u32,
}

impl Limits {
    pub fn validate(&self) -> Result {
        ensure!(
            self.max_weight.is_finite() && self.max_weight > 0.0,
            "maximum weight must be a positive number, got `{}`",
            self.max_weight,
        );
        Ok(())
    }
}

/// Relative importance of the package attributes in the objective.
#[derive(Copy, Clone, Debug, PartialEq, Builder)]
pub struct ObjectiveWeights {
    pub priority: f64,
    pub age: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self { priority: 1.0, age: 1.0 }
    }
}

impl ObjectiveWeights {
    pub fn validate(&self) -> Result {
        ensure!(self.priority.is_finite(), "priority weight must be finite");
        ensure!(self.age.is_finite(), "age weight must be finite");
        Ok(())
    }
}

/// Truck loading problem: one binary «shipped» variable per package.
#[derive(Builder)]
#[builder(finish_fn(vis = ""))]
pub struct Formulation<'a> {
    packages: &'a [Package],
    limits: Limits,

    #[builder(default)]
    weights: ObjectiveWeights,
}

impl<S: formulation_builder::IsComplete> FormulationBuilder<'_, S> {
    pub fn build_model(self) -> Model {
        self.build().into_model()
    }
}

impl Formulation<'_> {
    #[instrument(skip_all, fields(n_packages = self.packages.len()))]
    fn into_model(self) -> Model {
        // Maximize the weighted priority and age, hence the negation:
        let objective = self
            .packages
            .iter()
            .enumerate()
            .map(|(index, package)| {
                let value = self.weights.priority * f64::from(package.priority)
                    + self.weights.age * f64::from(package.age);
                (index, -value)
            })
            .collect();
        let capacity: LinearExpression = self
            .packages
            .iter()
            .enumerate()
            .map(|(index, package)| (index, f64::from(package.weight)))
            .collect();
        let count: LinearExpression = (0..self.packages.len()).map(|index| (index, 1.0)).collect();

        let model = Model::new(self.packages.len(), objective)
            .with_constraint(CAPACITY_LABEL, capacity, Sense::Le, self.limits.max_weight)
            .with_constraint(COUNT_LABEL, count, Sense::Eq, f64::from(self.limits.max_packages));
        debug!(n_variables = model.n_variables(), "built the model");
        model
    }
}

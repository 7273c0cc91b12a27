use clap::Parser;

use crate::{
    cli::{
        inspect::print_population,
        problem::ProblemArgs,
        report::ReportArgs,
        sampler::SamplerArgs,
    },
    core::{
        formulation::{Formulation, Limits, ObjectiveWeights},
        report::Outcome,
    },
    prelude::*,
};

#[derive(Parser)]
pub struct PackArgs {
    #[clap(flatten)]
    problem: ProblemArgs,

    #[clap(flatten)]
    limits: LimitArgs,

    #[clap(flatten)]
    objective: ObjectiveArgs,

    #[clap(flatten)]
    sampler: SamplerArgs,

    #[clap(flatten)]
    report: ReportArgs,
}

impl PackArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        // Fail fast before generating or loading anything:
        let limits = self.limits.limits()?;
        let weights = self.objective.weights()?;
        let sampler = self.sampler.new_sampler()?;

        let packages = self.problem.load()?;
        if self.report.show_input {
            print_population(&packages, true);
        }

        let model = Formulation::builder()
            .packages(&packages)
            .limits(limits)
            .weights(weights)
            .build_model();
        let samples = sampler.sample(&model, &self.sampler.label)?;
        let outcome = Outcome::select(&packages, &samples, limits);
        self.report.format.print(&outcome)
    }
}

#[derive(Parser)]
pub struct LimitArgs {
    /// Maximum total weight of the shipped packages.
    #[clap(long = "max-weight", env = "MAX_WEIGHT", default_value = "3000")]
    max_weight: f64,

    /// Exact number of packages to ship.
    #[clap(long = "max-packages", env = "MAX_PACKAGES", default_value = "100")]
    max_packages: u32,
}

impl LimitArgs {
    pub fn limits(&self) -> Result<Limits> {
        let limits =
            Limits::builder().max_weight(self.max_weight).max_packages(self.max_packages).build();
        limits.validate()?;
        Ok(limits)
    }
}

#[derive(Parser)]
pub struct ObjectiveArgs {
    /// Objective weight of the package priority.
    #[clap(long = "obj-weight-priority", env = "OBJ_WEIGHT_PRIORITY", default_value = "1.0")]
    priority: f64,

    /// Objective weight of the days since the order was placed.
    #[clap(long = "obj-weight-days", env = "OBJ_WEIGHT_DAYS", default_value = "1.0")]
    days: f64,
}

impl ObjectiveArgs {
    pub fn weights(&self) -> Result<ObjectiveWeights> {
        let weights = ObjectiveWeights::builder().priority(self.priority).age(self.days).build();
        weights.validate()?;
        Ok(weights)
    }
}

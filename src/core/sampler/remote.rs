use std::time::Duration;

use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::{
    core::{
        model::Model,
        sample::{Sample, SampleSet},
        sampler::Sampler,
    },
    prelude::*,
};

/// Solver service speaking JSON over HTTP.
///
/// The call blocks until the service responds, any failure is fatal for the run.
pub struct Remote {
    client: Agent,
    url: String,
}

impl Remote {
    pub fn new(url: String, timeout: Option<Duration>) -> Self {
        let client = Agent::config_builder().timeout_global(timeout).build().into();
        Self { client, url }
    }
}

impl Sampler for Remote {
    #[instrument(skip_all, fields(url = %self.url, label = label))]
    fn sample(&self, model: &Model, label: &str) -> Result<SampleSet> {
        info!(n_variables = model.n_variables(), "submitting…");
        let response = self
            .client
            .post(&self.url)
            .send_json(Request { label, model })
            .with_context(|| format!("failed to submit the model to `{}`", self.url))?
            .body_mut()
            .read_json::<Response>()
            .with_context(|| format!("failed to deserialize the response from `{}`", self.url))?;
        let samples = response.try_into_sample_set(model)?;
        info!(n_samples = samples.len(), n_feasible = samples.n_feasible(), "received");
        Ok(samples)
    }
}

#[derive(Serialize)]
struct Request<'a> {
    label: &'a str,
    model: &'a Model,
}

#[derive(Deserialize)]
struct Response {
    samples: Vec<RemoteSample>,
}

impl Response {
    fn try_into_sample_set(self, model: &Model) -> Result<SampleSet> {
        self.samples
            .into_iter()
            .enumerate()
            .map(|(index, sample)| {
                sample
                    .try_into_sample(model)
                    .with_context(|| format!("sample #{index} is malformed"))
            })
            .collect()
    }
}

#[derive(Deserialize)]
struct RemoteSample {
    assignment: Vec<u8>,
    energy: f64,
    is_feasible: bool,
}

impl RemoteSample {
    fn try_into_sample(self, model: &Model) -> Result<Sample> {
        ensure!(
            self.assignment.len() == model.n_variables(),
            "expected {} variables, got {}",
            model.n_variables(),
            self.assignment.len(),
        );
        let assignment = self
            .assignment
            .into_iter()
            .map(|value| match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => bail!("`{value}` is not a binary value"),
            })
            .collect::<Result<Vec<bool>>>()?;

        // The service is trusted with the energy, but not with the feasibility:
        let is_feasible = if self.is_feasible && !model.is_feasible(&assignment) {
            warn!(
                energy = self.energy,
                violation = model.total_violation(&assignment),
                "the service claims an infeasible sample to be feasible",
            );
            false
        } else {
            self.is_feasible
        };

        Ok(Sample { assignment, energy: self.energy, is_feasible })
    }
}

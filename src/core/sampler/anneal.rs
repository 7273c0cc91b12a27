use bon::Builder;
use ordered_float::OrderedFloat;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    core::{
        model::{FEASIBILITY_TOLERANCE, Model},
        sample::{Sample, SampleSet},
        sampler::{DenseModel, Sampler},
    },
    prelude::*,
};

/// Final temperature of every read.
const COLDEST: f64 = 0.01;

/// Simulated annealing over the penalized energy.
///
/// Moves are single-variable flips, or swaps when the two picked variables differ,
/// so that equality constraints on counts can be kept while exploring.
/// Each read contributes its best state; the samples are sorted by energy.
#[derive(Copy, Clone, Debug, Builder)]
pub struct Annealing {
    #[builder(default = 8)]
    n_reads: usize,

    /// Number of sweeps per read, one sweep is as many moves as there are variables.
    #[builder(default = 1000)]
    n_sweeps: usize,

    #[builder(default)]
    seed: u64,
}

impl Sampler for Annealing {
    #[instrument(skip_all, fields(label = label, n_reads = self.n_reads, n_sweeps = self.n_sweeps))]
    fn sample(&self, model: &Model, label: &str) -> Result<SampleSet> {
        let dense = DenseModel::new(model);
        let penalty = penalty_multiplier(&dense);
        debug!(penalty, "annealing…");

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut samples: SampleSet = (0..self.n_reads)
            .map(|_| Sample::evaluate(model, self.read(&dense, penalty, &mut rng)))
            .collect();
        samples.sort_by_energy();

        info!(n_samples = samples.len(), n_feasible = samples.n_feasible(), "annealed");
        Ok(samples)
    }
}

impl Annealing {
    #[expect(clippy::cast_precision_loss)]
    fn read(&self, model: &DenseModel, penalty: f64, rng: &mut StdRng) -> Vec<bool> {
        let n_variables = model.n_variables();
        let mut state = State::random(model, rng);
        if n_variables == 0 {
            return state.assignment;
        }

        let mut best = (state.rank(), state.assignment.clone());
        for sweep in 0..self.n_sweeps {
            let progress = sweep as f64 / self.n_sweeps as f64;
            let temperature = penalty * (COLDEST / penalty).powf(progress);
            for _ in 0..n_variables {
                let pair = [rng.random_range(0..n_variables), rng.random_range(0..n_variables)];
                let flips = if state.assignment[pair[0]] == state.assignment[pair[1]] {
                    &pair[..1]
                } else {
                    &pair[..]
                };
                let delta = state.delta(flips, penalty);
                if delta <= 0.0 || rng.random::<f64>() < (-delta / temperature).exp() {
                    state.flip(flips);
                    let rank = state.rank();
                    if rank < best.0 {
                        best = (rank, state.assignment.clone());
                    }
                }
            }
        }
        best.1
    }
}

/// Makes any violation reduction outweigh the objective change of a single move.
fn penalty_multiplier(model: &DenseModel) -> f64 {
    let max_coefficient =
        model.objective.iter().map(|coefficient| OrderedFloat(coefficient.abs())).max();
    2.0 * max_coefficient.map_or(0.0, |coefficient| coefficient.0) + 1.0
}

struct State<'a> {
    model: &'a DenseModel,
    assignment: Vec<bool>,
    objective: f64,
    lhs: Vec<f64>,
}

impl<'a> State<'a> {
    fn random(model: &'a DenseModel, rng: &mut StdRng) -> Self {
        let mut state = Self {
            model,
            assignment: vec![false; model.n_variables()],
            objective: 0.0,
            lhs: vec![0.0; model.constraints.len()],
        };
        for variable in 0..model.n_variables() {
            if rng.random_bool(0.5) {
                state.flip(&[variable]);
            }
        }
        state
    }

    /// Change in the objective or left-hand side when the variable gets flipped.
    fn sign(&self, variable: usize) -> f64 {
        if self.assignment[variable] { -1.0 } else { 1.0 }
    }

    fn violation(&self) -> f64 {
        self.model
            .constraints
            .iter()
            .zip(&self.lhs)
            .map(|(constraint, lhs)| constraint.violation_at(*lhs))
            .sum()
    }

    /// Feasible states rank above infeasible ones, then the objective decides.
    fn rank(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
        let violation = self.violation();
        if violation <= FEASIBILITY_TOLERANCE {
            (OrderedFloat(0.0), OrderedFloat(self.objective))
        } else {
            (OrderedFloat(violation), OrderedFloat(self.objective))
        }
    }

    fn delta(&self, flips: &[usize], penalty: f64) -> f64 {
        let objective: f64 = flips
            .iter()
            .map(|variable| self.sign(*variable) * self.model.objective[*variable])
            .sum();
        let violation: f64 = self
            .model
            .constraints
            .iter()
            .zip(&self.lhs)
            .map(|(constraint, lhs)| {
                let shift: f64 = flips
                    .iter()
                    .map(|variable| self.sign(*variable) * constraint.coefficients[*variable])
                    .sum();
                constraint.violation_at(lhs + shift) - constraint.violation_at(*lhs)
            })
            .sum();
        objective + penalty * violation
    }

    fn flip(&mut self, flips: &[usize]) {
        for &variable in flips {
            let sign = self.sign(variable);
            self.objective += sign * self.model.objective[variable];
            for (lhs, constraint) in self.lhs.iter_mut().zip(&self.model.constraints) {
                *lhs += sign * constraint.coefficients[variable];
            }
            self.assignment[variable] = !self.assignment[variable];
        }
    }
}

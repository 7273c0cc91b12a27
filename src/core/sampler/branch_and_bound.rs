use bon::Builder;
use ordered_float::OrderedFloat;

use crate::{
    core::{
        model::{FEASIBILITY_TOLERANCE, Model, Sense},
        sample::{Sample, SampleSet},
        sampler::{DenseModel, Sampler},
    },
    prelude::*,
};

/// Exact depth-first branch-and-bound, meant for small models.
///
/// Prunes on the reachable interval of every constraint and on the objective bound.
/// Every improving incumbent becomes a sample, the best one comes first.
#[derive(Copy, Clone, Debug, Builder)]
pub struct BranchAndBound {
    /// The search gives up after visiting this many nodes.
    #[builder(default = 1_000_000)]
    max_nodes: u64,
}

impl Sampler for BranchAndBound {
    #[instrument(skip_all, fields(label = label, n_variables = model.n_variables()))]
    fn sample(&self, model: &Model, label: &str) -> Result<SampleSet> {
        let dense = DenseModel::new(model);
        let mut search = Search::new(&dense, self.max_nodes);
        search.run();
        if search.is_truncated {
            warn!(max_nodes = self.max_nodes, "node limit reached, the samples may be suboptimal");
        }
        info!(n_nodes = search.n_nodes, n_incumbents = search.incumbents.len(), "searched");
        Ok(search
            .incumbents
            .into_iter()
            .rev()
            .map(|assignment| Sample::evaluate(model, assignment))
            .collect())
    }
}

struct Search<'a> {
    model: &'a DenseModel,

    /// Variables in the branching order.
    order: Vec<usize>,

    /// `(min, max)` that the variables from the depth onwards can still add to each constraint.
    remaining_bounds: Vec<Vec<(f64, f64)>>,

    /// Minimum that the variables from the depth onwards can still add to the objective.
    remaining_objective: Vec<f64>,

    assignment: Vec<bool>,
    lhs: Vec<f64>,
    objective: f64,
    best_objective: f64,
    incumbents: Vec<Vec<bool>>,

    n_nodes: u64,
    max_nodes: u64,
    is_truncated: bool,
}

impl<'a> Search<'a> {
    fn new(model: &'a DenseModel, max_nodes: u64) -> Self {
        let n_variables = model.n_variables();

        // Most rewarding variables first, so that the first dive lands on a good incumbent:
        let mut order: Vec<usize> = (0..n_variables).collect();
        order.sort_by_key(|variable| OrderedFloat(model.objective[*variable]));

        let mut remaining_bounds = vec![vec![(0.0, 0.0); model.constraints.len()]; n_variables + 1];
        let mut remaining_objective = vec![0.0; n_variables + 1];
        for depth in (0..n_variables).rev() {
            let variable = order[depth];
            remaining_objective[depth] =
                remaining_objective[depth + 1] + model.objective[variable].min(0.0);
            for (index, constraint) in model.constraints.iter().enumerate() {
                let coefficient = constraint.coefficients[variable];
                let (min, max) = remaining_bounds[depth + 1][index];
                remaining_bounds[depth][index] =
                    (min + coefficient.min(0.0), max + coefficient.max(0.0));
            }
        }

        Self {
            model,
            order,
            remaining_bounds,
            remaining_objective,
            assignment: vec![false; n_variables],
            lhs: vec![0.0; model.constraints.len()],
            objective: 0.0,
            best_objective: f64::INFINITY,
            incumbents: Vec::new(),
            n_nodes: 0,
            max_nodes,
            is_truncated: false,
        }
    }

    /// Depth-first traversal on an explicit stack, the depth is not bound by the thread stack.
    fn run(&mut self) {
        // Branching depth and the number of its values tried so far:
        let mut frames: Vec<(usize, usize)> = Vec::new();
        if self.enter(0) {
            frames.push((0, 0));
        }
        while let Some((depth, n_tried)) = frames.last_mut() {
            let depth = *depth;
            let values = self.branching_values(depth);
            let variable = self.order[depth];
            if *n_tried != 0 {
                self.unassign(variable, values[*n_tried - 1]);
            }
            if *n_tried == values.len() {
                frames.pop();
                continue;
            }
            let value = values[*n_tried];
            *n_tried += 1;
            self.assign(variable, value);
            if self.enter(depth + 1) {
                frames.push((depth + 1, 0));
            }
        }
    }

    /// Count the node and tell whether it needs branching.
    fn enter(&mut self, depth: usize) -> bool {
        if self.n_nodes >= self.max_nodes {
            self.is_truncated = true;
            return false;
        }
        self.n_nodes += 1;

        if !self.is_promising(depth) {
            return false;
        }
        if depth == self.order.len() {
            // Nothing is left to assign, so the bounds above are exact.
            self.best_objective = self.objective;
            self.incumbents.push(self.assignment.clone());
            return false;
        }
        true
    }

    /// The rewarding value goes first.
    fn branching_values(&self, depth: usize) -> [bool; 2] {
        let preferred = self.model.objective[self.order[depth]] < 0.0;
        [preferred, !preferred]
    }

    fn is_promising(&self, depth: usize) -> bool {
        if self.objective + self.remaining_objective[depth]
            >= self.best_objective - FEASIBILITY_TOLERANCE
        {
            return false;
        }
        self.model.constraints.iter().zip(&self.lhs).zip(&self.remaining_bounds[depth]).all(
            |((constraint, lhs), (min, max))| {
                let fits_below = lhs + min <= constraint.rhs + FEASIBILITY_TOLERANCE;
                let fits_above = lhs + max >= constraint.rhs - FEASIBILITY_TOLERANCE;
                match constraint.sense {
                    Sense::Le => fits_below,
                    Sense::Ge => fits_above,
                    Sense::Eq => fits_below && fits_above,
                }
            },
        )
    }

    fn assign(&mut self, variable: usize, value: bool) {
        if value {
            self.shift(variable, 1.0);
        }
    }

    fn unassign(&mut self, variable: usize, value: bool) {
        if value {
            self.shift(variable, -1.0);
        }
    }

    fn shift(&mut self, variable: usize, sign: f64) {
        self.assignment[variable] = sign > 0.0;
        self.objective += sign * self.model.objective[variable];
        for (lhs, constraint) in self.lhs.iter_mut().zip(&self.model.constraints) {
            *lhs += sign * constraint.coefficients[variable];
        }
    }
}

use derive_more::{From, IntoIterator};
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::core::model::Model;

/// Candidate assignment returned by a sampler.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sample {
    /// Whether each package is shipped, indexed like the packages.
    pub assignment: Vec<bool>,

    pub energy: f64,
    pub is_feasible: bool,
}

impl Sample {
    /// Evaluate the assignment against the model.
    pub fn evaluate(model: &Model, assignment: Vec<bool>) -> Self {
        debug_assert_eq!(assignment.len(), model.n_variables());
        Self {
            energy: model.energy(&assignment),
            is_feasible: model.is_feasible(&assignment),
            assignment,
        }
    }

    /// Indices of the shipped packages.
    pub fn shipped(&self) -> impl Iterator<Item = usize> {
        self.assignment.iter().enumerate().filter(|(_, shipped)| **shipped).map(|(index, _)| index)
    }
}

/// Samples in the sampler-defined order.
#[derive(Clone, Debug, Default, PartialEq, From, IntoIterator)]
pub struct SampleSet(#[into_iterator(owned, ref)] Vec<Sample>);

impl FromIterator<Sample> for SampleSet {
    fn from_iter<T: IntoIterator<Item = Sample>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl SampleSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.0.iter()
    }

    pub fn feasible(&self) -> impl Iterator<Item = &Sample> {
        self.iter().filter(|sample| sample.is_feasible)
    }

    #[must_use]
    pub fn n_feasible(&self) -> usize {
        self.feasible().count()
    }

    /// The only sample the reporter ever consumes.
    #[must_use]
    pub fn first_feasible(&self) -> Option<&Sample> {
        self.feasible().next()
    }

    /// Stable sort by energy, lowest first.
    pub fn sort_by_energy(&mut self) {
        self.0.sort_by_key(|sample| OrderedFloat(sample.energy));
    }
}

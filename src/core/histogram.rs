use itertools::Itertools;
use serde::Serialize;

use crate::core::package::{AGES, PRIORITIES, Package};

const N_WEIGHT_BINS: usize = 10;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, derive_more::Display)]
pub enum Attribute {
    Priority,
    Age,
    Weight,
}

impl Attribute {
    pub const ALL: [Self; 3] = [Self::Priority, Self::Age, Self::Weight];
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bin {
    pub label: String,

    /// Package count of each group.
    pub counts: Vec<usize>,
}

/// Distribution of an attribute over several package groups sharing the same bins.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Histogram {
    pub attribute: Attribute,
    pub bins: Vec<Bin>,
}

impl Histogram {
    pub fn all(groups: &[&[Package]]) -> Vec<Self> {
        Attribute::ALL.into_iter().map(|attribute| Self::build(attribute, groups)).collect()
    }

    pub fn build(attribute: Attribute, groups: &[&[Package]]) -> Self {
        let bins = match attribute {
            Attribute::Priority => Self::discrete(groups, PRIORITIES, |package| package.priority),
            Attribute::Age => Self::discrete(groups, AGES, |package| package.age),
            Attribute::Weight => Self::weight(groups),
        };
        Self { attribute, bins }
    }

    /// Largest bin total, for scaling the bars.
    #[must_use]
    pub fn max_total(&self) -> usize {
        self.bins.iter().map(|bin| bin.counts.iter().sum::<usize>()).max().unwrap_or(0)
    }

    fn discrete(
        groups: &[&[Package]],
        values: impl Iterator<Item = u8>,
        value_of: impl Fn(&Package) -> u8,
    ) -> Vec<Bin> {
        values
            .map(|value| Bin {
                label: value.to_string(),
                counts: groups
                    .iter()
                    .map(|group| group.iter().filter(|package| value_of(package) == value).count())
                    .collect(),
            })
            .collect()
    }

    /// Equal-width bins over the observed range, the last one is closed.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn weight(groups: &[&[Package]]) -> Vec<Bin> {
        let Some((min, max)) = groups
            .iter()
            .flat_map(|group| group.iter())
            .map(|package| package.weight)
            .minmax()
            .into_option()
        else {
            return Vec::new();
        };
        let (start, end) = if min == max {
            (f64::from(min) - 0.5, f64::from(max) + 0.5)
        } else {
            (f64::from(min), f64::from(max))
        };
        let width = (end - start) / N_WEIGHT_BINS as f64;

        let mut bins: Vec<Bin> = (0..N_WEIGHT_BINS)
            .map(|index| {
                let left = (index as f64).mul_add(width, start);
                let right = left + width;
                let closing = if index + 1 == N_WEIGHT_BINS { ']' } else { ')' };
                Bin {
                    label: format!("[{left:.1}, {right:.1}{closing}"),
                    counts: vec![0; groups.len()],
                }
            })
            .collect();
        for (group_index, group) in groups.iter().enumerate() {
            for package in *group {
                let index = ((f64::from(package.weight) - start) / width) as usize;
                bins[index.min(N_WEIGHT_BINS - 1)].counts[group_index] += 1;
            }
        }
        bins
    }
}

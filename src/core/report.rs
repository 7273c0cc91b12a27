use serde::Serialize;

use crate::{
    core::{
        formulation::Limits,
        grid::ContingencyGrid,
        histogram::Histogram,
        package::Package,
        sample::{Sample, SampleSet},
    },
    prelude::*,
};

/// Package indices split by the selected sample.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub shipped: Vec<usize>,
    pub not_shipped: Vec<usize>,
}

impl From<&Sample> for Selection {
    fn from(sample: &Sample) -> Self {
        let shipped: Vec<usize> = sample.shipped().collect();
        let not_shipped =
            (0..sample.assignment.len()).filter(|index| !sample.assignment[*index]).collect();
        Self { shipped, not_shipped }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub limits: Limits,
    pub energy: f64,
    pub total_weight: u64,
    pub total_count: usize,

    /// Characterization of all the packages.
    pub problem: ContingencyGrid,

    /// Characterization of the shipped packages.
    pub solution: ContingencyGrid,

    /// Shipped versus not shipped, per attribute.
    pub distributions: Vec<Histogram>,

    pub selection: Selection,
}

impl Report {
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn is_within_weight_limit(&self) -> bool {
        self.total_weight as f64 <= self.limits.max_weight
    }

    #[must_use]
    pub fn is_at_package_limit(&self) -> bool {
        u32::try_from(self.total_count).is_ok_and(|count| count == self.limits.max_packages)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Not an error: the limits may simply be impossible to meet.
    NoFeasibleSolution,

    Shipped(Box<Report>),
}

impl Outcome {
    /// Consume the first feasible sample in the sampler order, if any.
    #[instrument(skip_all, fields(n_samples = samples.len()))]
    pub fn select(packages: &[Package], samples: &SampleSet, limits: Limits) -> Self {
        if samples.is_empty() {
            warn!("the sampler returned no samples");
        }
        let Some(sample) = samples.first_feasible() else {
            info!("no feasible solution found");
            return Self::NoFeasibleSolution;
        };
        debug_assert_eq!(sample.assignment.len(), packages.len());

        let selection = Selection::from(sample);
        let shipped: Vec<Package> =
            selection.shipped.iter().map(|index| packages[*index]).collect();
        let not_shipped: Vec<Package> =
            selection.not_shipped.iter().map(|index| packages[*index]).collect();

        let report = Report {
            limits,
            energy: sample.energy,
            total_weight: shipped.iter().map(|package| u64::from(package.weight)).sum(),
            total_count: shipped.len(),
            problem: packages.iter().collect(),
            solution: shipped.iter().collect(),
            distributions: Histogram::all(&[shipped.as_slice(), not_shipped.as_slice()]),
            selection,
        };
        info!(report.total_weight, report.total_count, report.energy, "selected");
        Self::Shipped(Box::new(report))
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use proptest::prelude::*;

    use super::*;
    use crate::core::{
        formulation::Formulation,
        generator::Generator,
        sampler::{Annealing, BranchAndBound, Sampler},
    };

    fn scenario() -> Vec<Package> {
        [(3, 3, 10), (3, 0, 20), (1, 3, 30), (2, 1, 5), (1, 2, 15)]
            .into_iter()
            .map(|(priority, age, weight)| Package { priority, age, weight })
            .collect()
    }

    fn solve(packages: &[Package], limits: Limits, sampler: &dyn Sampler) -> Result<Outcome> {
        let model = Formulation::builder().packages(packages).limits(limits).build_model();
        let samples = sampler.sample(&model, "test")?;
        Ok(Outcome::select(packages, &samples, limits))
    }

    fn sample(assignment: Vec<bool>, is_feasible: bool) -> Sample {
        Sample { assignment, energy: 0.0, is_feasible }
    }

    #[test]
    fn test_selection() {
        let selection = Selection::from(&sample(vec![false, true, true, false], true));
        assert_eq!(selection.shipped, [1, 2]);
        assert_eq!(selection.not_shipped, [0, 3]);
    }

    #[test]
    fn test_first_feasible_is_consumed() {
        let packages = scenario();
        let samples = SampleSet::from(vec![
            sample(vec![true, true, true, true, true], false),
            sample(vec![false, false, false, true, true], true),
            sample(vec![true, false, true, false, false], true),
        ]);
        let limits = Limits { max_weight: 40.0, max_packages: 2 };
        let Outcome::Shipped(report) = Outcome::select(&packages, &samples, limits) else {
            panic!("expected a feasible solution");
        };
        assert_eq!(report.selection.shipped, [3, 4]);
        assert_eq!(report.total_weight, 20);
        assert_eq!(report.total_count, 2);
        assert_eq!(report.problem.total(), 5);
        assert_eq!(report.solution.total(), 2);
        assert_eq!(report.solution.get(2, 1), 1);
        assert_eq!(report.solution.get(1, 2), 1);
        assert!(report.is_within_weight_limit());
        assert!(report.is_at_package_limit());
    }

    #[test]
    fn test_scenario() -> Result {
        let packages = scenario();
        let limits = Limits { max_weight: 40.0, max_packages: 2 };
        let feasible_pairs: Vec<Vec<usize>> = (0..packages.len())
            .combinations(2)
            .filter(|pair| pair.iter().map(|index| packages[*index].weight).sum::<u32>() <= 40)
            .collect();

        for sampler in [
            &BranchAndBound::builder().build() as &dyn Sampler,
            &Annealing::builder().n_reads(4).n_sweeps(200).seed(1).build(),
        ] {
            let Outcome::Shipped(report) = solve(&packages, limits, sampler)? else {
                bail!("expected a feasible solution");
            };
            assert_eq!(report.total_count, 2);
            assert!(report.total_weight <= 40);
            assert!(feasible_pairs.contains(&report.selection.shipped));
        }
        Ok(())
    }

    #[test]
    fn test_more_required_than_available() -> Result {
        let packages = scenario();
        let limits = Limits { max_weight: 1000.0, max_packages: 6 };
        assert_eq!(
            solve(&packages, limits, &BranchAndBound::builder().build())?,
            Outcome::NoFeasibleSolution,
        );
        assert_eq!(
            solve(&packages, limits, &Annealing::builder().n_reads(2).n_sweeps(50).build())?,
            Outcome::NoFeasibleSolution,
        );
        Ok(())
    }

    #[test]
    fn test_no_packages() -> Result {
        let sampler = BranchAndBound::builder().build();

        let limits = Limits { max_weight: 3000.0, max_packages: 0 };
        let Outcome::Shipped(report) = solve(&[], limits, &sampler)? else {
            bail!("expected the empty selection to be feasible");
        };
        assert_eq!(report.total_weight, 0);
        assert_eq!(report.total_count, 0);

        let limits = Limits { max_weight: 3000.0, max_packages: 1 };
        assert_eq!(solve(&[], limits, &sampler)?, Outcome::NoFeasibleSolution);
        Ok(())
    }

    #[test]
    fn test_tabulation_is_pure() -> Result {
        let packages = Generator::seeded(5).generate(60);
        let limits = Limits { max_weight: 800.0, max_packages: 20 };
        let sampler = Annealing::builder().n_reads(2).n_sweeps(100).seed(5).build();
        let model = Formulation::builder().packages(&packages).limits(limits).build_model();
        let samples = sampler.sample(&model, "test")?;
        assert_eq!(
            Outcome::select(&packages, &samples, limits),
            Outcome::select(&packages, &samples, limits),
        );
        Ok(())
    }

    #[test]
    fn test_serialize_no_feasible_solution() -> Result {
        let json = serde_json::to_value(Outcome::NoFeasibleSolution)?;
        assert_eq!(json, serde_json::json!({"status": "no_feasible_solution"}));
        Ok(())
    }

    #[test]
    fn test_serialize_shipped() -> Result {
        let packages = scenario();
        let limits = Limits { max_weight: 40.0, max_packages: 2 };
        let outcome = solve(&packages, limits, &BranchAndBound::builder().build())?;
        let json = serde_json::to_value(outcome)?;
        assert_eq!(json["status"], "shipped");
        assert_eq!(json["total_weight"], 40);
        assert_eq!(json["selection"]["shipped"], serde_json::json!([0, 2]));
        Ok(())
    }

    prop_compose! {
        fn packages()(
            attributes in prop::collection::vec((1..=3_u8, 0..=3_u8, 1..=100_u32), 0..12),
        ) -> Vec<Package> {
            attributes
                .into_iter()
                .map(|(priority, age, weight)| Package { priority, age, weight })
                .collect()
        }
    }

    proptest! {
        #[test]
        fn test_accepted_selection_is_within_limits(
            packages in packages(),
            max_weight in 1.0..500.0_f64,
            max_packages in 0..8_u32,
        ) {
            let limits = Limits { max_weight, max_packages };
            let outcome = solve(&packages, limits, &BranchAndBound::builder().build()).unwrap();
            match outcome {
                Outcome::Shipped(report) => {
                    #[expect(clippy::cast_precision_loss)]
                    let total_weight = report.total_weight as f64;
                    prop_assert!(total_weight <= max_weight);
                    prop_assert_eq!(report.total_count, max_packages as usize);
                    prop_assert_eq!(report.problem.total(), packages.len());
                    prop_assert_eq!(report.solution.total(), report.total_count);
                    let selection = &report.selection;
                    prop_assert_eq!(
                        selection.shipped.len() + selection.not_shipped.len(),
                        packages.len(),
                    );
                }
                Outcome::NoFeasibleSolution => {
                    // The lightest packages are the last resort:
                    let lightest: u32 = packages
                        .iter()
                        .map(|package| package.weight)
                        .sorted()
                        .take(max_packages as usize)
                        .sum();
                    prop_assert!(
                        max_packages as usize > packages.len() || f64::from(lightest) > max_weight
                    );
                }
            }
        }
    }
}

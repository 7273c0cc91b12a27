use std::fmt::{Display, Formatter};

use crate::core::{grid::ContingencyGrid, report::Outcome};

const RULE_WIDTH: usize = 40;

/// Fixed-width plain-text rendering of the outcome.
pub struct TextReport<'a>(pub &'a Outcome);

impl Display for TextReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Outcome::Shipped(report) = self.0 else {
            return writeln!(f, "No feasible solutions found");
        };

        writeln!(f, "\n****************** PROBLEM ******************\n")?;
        write_grid(f, &report.problem, Alignment::Right)?;

        writeln!(f, "\n****************** SOLUTION ****************** ")?;
        write_grid(f, &report.solution, Alignment::Center)?;

        writeln!(
            f,
            "\nTotal number of selected items: {} / {}",
            report.total_count, report.limits.max_packages,
        )?;
        writeln!(
            f,
            "Total weight of selected items: {} / {}",
            report.total_weight, report.limits.max_weight,
        )
    }
}

/// Alignment of the columns after the oldest one.
#[derive(Copy, Clone)]
enum Alignment {
    Right,
    Center,
}

impl Alignment {
    fn write(self, f: &mut Formatter<'_>, value: impl Display) -> std::fmt::Result {
        match self {
            Self::Right => write!(f, "{value:>5}"),
            Self::Center => write!(f, "{value:^5}"),
        }
    }
}

fn write_grid(
    f: &mut Formatter<'_>,
    grid: &ContingencyGrid,
    alignment: Alignment,
) -> std::fmt::Result {
    writeln!(f, "            Days since order was placed")?;
    write!(f, "Priority |")?;
    for (index, age) in ContingencyGrid::ages().enumerate() {
        if index == 0 {
            write!(f, "{age:>5}")?;
        } else {
            alignment.write(f, age)?;
        }
    }
    writeln!(f)?;
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;

    for (priority, counts) in grid.rows() {
        write!(f, "{priority:>5}")?;
        for (index, count) in counts.iter().enumerate() {
            if index == 0 {
                write!(f, "{count:>10}")?;
            } else {
                alignment.write(f, count)?;
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        formulation::Limits,
        package::Package,
        sample::{Sample, SampleSet},
    };

    #[test]
    fn test_no_feasible_solution() {
        let text = TextReport(&Outcome::NoFeasibleSolution).to_string();
        assert_eq!(text, "No feasible solutions found\n");
    }

    #[test]
    fn test_shipped() {
        let packages = [
            Package { priority: 3, age: 3, weight: 10 },
            Package { priority: 3, age: 0, weight: 20 },
            Package { priority: 1, age: 3, weight: 30 },
            Package { priority: 2, age: 1, weight: 5 },
            Package { priority: 1, age: 2, weight: 15 },
        ];
        let samples = SampleSet::from(vec![Sample {
            assignment: vec![true, false, true, false, false],
            energy: -10.0,
            is_feasible: true,
        }]);
        let outcome =
            Outcome::select(&packages, &samples, Limits { max_weight: 40.0, max_packages: 2 });

        let expected = [
            "",
            "****************** PROBLEM ******************",
            "",
            "            Days since order was placed",
            "Priority |    3    2    1    0",
            "----------------------------------------",
            "    3         1    0    0    1",
            "    2         0    0    1    0",
            "    1         1    1    0    0",
            "",
            "****************** SOLUTION ****************** ",
            "            Days since order was placed",
            "Priority |    3  2    1    0  ",
            "----------------------------------------",
            "    3         1  0    0    0  ",
            "    2         0  0    0    0  ",
            "    1         1  0    0    0  ",
            "",
            "Total number of selected items: 2 / 2",
            "Total weight of selected items: 40 / 40",
            "",
        ]
        .join("\n");
        assert_eq!(TextReport(&outcome).to_string(), expected);
    }
}

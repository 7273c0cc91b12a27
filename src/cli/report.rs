use clap::Parser;

use crate::{
    core::report::Outcome,
    fmt::TextReport,
    prelude::*,
    tables::{build_grid_table, build_histogram_table, build_summary_table},
};

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum Format {
    /// Plain fixed-width grids.
    Text,

    /// Colored tables with the distributions.
    Table,

    Json,
}

#[derive(Parser)]
pub struct ReportArgs {
    #[clap(long = "format", env = "REPORT_FORMAT", default_value = "text")]
    pub format: Format,

    /// Print the input packages and their distributions before solving.
    #[clap(long = "show-input")]
    pub show_input: bool,
}

impl Format {
    pub fn print(self, outcome: &Outcome) -> Result {
        match self {
            Self::Text => {
                print!("{}", TextReport(outcome));
            }
            Self::Table => match outcome {
                Outcome::NoFeasibleSolution => {
                    println!("No feasible solutions found");
                }
                Outcome::Shipped(report) => {
                    println!("{}", build_summary_table(report));
                    println!("Problem:\n{}", build_grid_table(&report.problem));
                    println!("Solution:\n{}", build_grid_table(&report.solution));
                    for histogram in &report.distributions {
                        let table = build_histogram_table(histogram, &["Shipped", "Not shipped"]);
                        println!("{table}");
                    }
                }
            },
            Self::Json => {
                let json = serde_json::to_string_pretty(outcome)
                    .context("failed to serialize the outcome")?;
                println!("{json}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        formulation::Limits,
        package::Package,
        sample::{Sample, SampleSet},
    };

    #[derive(Parser)]
    struct TestArgs {
        #[clap(flatten)]
        report: ReportArgs,
    }

    fn shipped() -> Outcome {
        let packages = [
            Package { priority: 3, age: 3, weight: 10 },
            Package { priority: 1, age: 0, weight: 20 },
        ];
        let samples = SampleSet::from(vec![Sample {
            assignment: vec![true, false],
            energy: -6.0,
            is_feasible: true,
        }]);
        Outcome::select(&packages, &samples, Limits { max_weight: 15.0, max_packages: 1 })
    }

    #[test]
    fn test_parse_format() -> Result {
        let args = TestArgs::try_parse_from(["truckload", "--format", "json", "--show-input"])?;
        assert!(matches!(args.report.format, Format::Json));
        assert!(args.report.show_input);
        Ok(())
    }

    #[test]
    fn test_unknown_format() {
        assert!(TestArgs::try_parse_from(["truckload", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_print_every_format() -> Result {
        for format in [Format::Text, Format::Table, Format::Json] {
            format.print(&shipped())?;
            format.print(&Outcome::NoFeasibleSolution)?;
        }
        Ok(())
    }
}

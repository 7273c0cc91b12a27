use clap::Parser;

use crate::{
    cli::problem::ProblemArgs,
    core::{grid::ContingencyGrid, histogram::Histogram, package::Package},
    prelude::*,
    tables::{build_grid_table, build_histogram_table, build_packages_table},
};

#[derive(Parser)]
pub struct InspectArgs {
    #[clap(flatten)]
    problem: ProblemArgs,

    /// Print every package too.
    #[clap(long = "show-packages")]
    show_packages: bool,
}

impl InspectArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let packages = self.problem.load()?;
        print_population(&packages, self.show_packages);
        Ok(())
    }
}

pub fn print_population(packages: &[Package], show_packages: bool) {
    if show_packages {
        println!("{}", build_packages_table(packages));
    }
    let grid: ContingencyGrid = packages.iter().collect();
    println!("{}", build_grid_table(&grid));
    for histogram in Histogram::all(&[packages]) {
        println!("{}", build_histogram_table(&histogram, &["Packages"]));
    }
}

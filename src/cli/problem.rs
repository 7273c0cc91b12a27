use std::path::PathBuf;

use clap::Parser;

use crate::{
    core::{
        generator::Generator,
        package::{Manifest, Package},
    },
    prelude::*,
};

#[derive(Parser)]
pub struct GenerationArgs {
    /// Number of packages to generate.
    #[clap(long = "num-packages", env = "NUM_PACKAGES", default_value = "300")]
    pub num_packages: usize,

    /// Package generator seed, random when omitted.
    #[clap(long = "seed", env = "PACKAGES_SEED")]
    pub seed: Option<u64>,
}

impl GenerationArgs {
    #[instrument(skip_all, fields(num_packages = self.num_packages))]
    pub fn generate(&self) -> Vec<Package> {
        let seed = self.seed.unwrap_or_else(rand::random);
        info!(seed, "generating packages…");
        Generator::seeded(seed).generate(self.num_packages)
    }
}

#[derive(Parser)]
pub struct ProblemArgs {
    #[clap(flatten)]
    pub generation: GenerationArgs,

    /// TOML manifest to load the packages from instead of generating them.
    #[clap(long = "input", env = "PACKAGES_FILE")]
    pub input: Option<PathBuf>,
}

impl ProblemArgs {
    pub fn load(&self) -> Result<Vec<Package>> {
        match &self.input {
            Some(path) => Ok(Manifest::read_from(path)?.packages),
            None => Ok(self.generation.generate()),
        }
    }
}

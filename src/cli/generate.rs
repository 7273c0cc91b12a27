use std::path::PathBuf;

use clap::Parser;

use crate::{cli::problem::GenerationArgs, core::package::Manifest, prelude::*};

#[derive(Parser)]
pub struct GenerateArgs {
    #[clap(flatten)]
    generation: GenerationArgs,

    /// Manifest path to write.
    #[clap(long = "output", short = 'o', default_value = "packages.toml")]
    output: PathBuf,
}

impl GenerateArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let manifest = Manifest { packages: self.generation.generate() };
        manifest.write_to(&self.output)
    }
}

mod generate;
mod inspect;
mod pack;
mod problem;
mod report;
mod sampler;

use clap::{Parser, Subcommand};

use crate::{
    cli::{generate::GenerateArgs, inspect::InspectArgs, pack::PackArgs},
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: pick the packages to ship and report the selection.
    #[clap(name = "pack")]
    Pack(Box<PackArgs>),

    /// Generate random packages and save them into a manifest.
    #[clap(name = "generate")]
    Generate(GenerateArgs),

    /// Characterize the packages without solving.
    #[clap(name = "inspect")]
    Inspect(InspectArgs),
}

impl Command {
    pub fn run(self) -> Result {
        match self {
            Self::Pack(args) => args.run(),
            Self::Generate(args) => args.run(),
            Self::Inspect(args) => args.run(),
        }
    }
}

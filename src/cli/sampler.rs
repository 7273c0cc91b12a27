use std::time::Duration;

use clap::Parser;

use crate::{
    core::sampler::{Annealing, BranchAndBound, Remote, Sampler},
    prelude::*,
};

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum SamplerKind {
    /// Simulated annealing, fast but not guaranteed to find the optimum.
    Anneal,

    /// Exhaustive branch-and-bound search, only practical for small problems.
    Exact,

    /// External solver service.
    Remote,
}

#[derive(Parser)]
pub struct SamplerArgs {
    #[clap(long = "sampler", env = "SAMPLER", default_value = "anneal")]
    kind: SamplerKind,

    /// Job label passed along with the model.
    #[clap(long = "label", env = "SAMPLER_LABEL", default_value = "Truck Packing Demo")]
    pub label: String,

    /// Number of independent annealing runs.
    #[clap(long = "num-reads", env = "NUM_READS", default_value = "8")]
    num_reads: usize,

    /// Number of sweeps per annealing run.
    #[clap(long = "num-sweeps", env = "NUM_SWEEPS", default_value = "1000")]
    num_sweeps: usize,

    /// Annealing seed, random when omitted.
    #[clap(long = "sampler-seed", env = "SAMPLER_SEED")]
    seed: Option<u64>,

    /// Branch-and-bound node limit.
    #[clap(long = "max-nodes", env = "MAX_NODES", default_value = "1000000")]
    max_nodes: u64,

    /// Solver service endpoint, required by the remote sampler.
    #[clap(long = "remote-url", env = "REMOTE_URL")]
    remote_url: Option<String>,

    #[clap(long = "remote-timeout-secs", env = "REMOTE_TIMEOUT_SECS")]
    remote_timeout_secs: Option<u64>,
}

impl SamplerArgs {
    pub fn new_sampler(&self) -> Result<Box<dyn Sampler>> {
        match self.kind {
            SamplerKind::Anneal => {
                ensure!(self.num_reads > 0, "number of reads must be positive");
                let seed = self.seed.unwrap_or_else(rand::random);
                info!(
                    seed,
                    num_reads = self.num_reads,
                    num_sweeps = self.num_sweeps,
                    "using simulated annealing",
                );
                Ok(Box::new(
                    Annealing::builder()
                        .n_reads(self.num_reads)
                        .n_sweeps(self.num_sweeps)
                        .seed(seed)
                        .build(),
                ))
            }
            SamplerKind::Exact => {
                info!(max_nodes = self.max_nodes, "using branch and bound");
                Ok(Box::new(BranchAndBound::builder().max_nodes(self.max_nodes).build()))
            }
            SamplerKind::Remote => {
                let url = self
                    .remote_url
                    .clone()
                    .context("`--remote-url` is required by the remote sampler")?;
                info!(url = %url, "using the solver service");
                Ok(Box::new(Remote::new(url, self.remote_timeout_secs.map(Duration::from_secs))))
            }
        }
    }
}

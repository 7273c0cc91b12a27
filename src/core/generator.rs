use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::core::package::{AGES, PRIORITIES, Package, WEIGHTS};

/// Synthetic package source.
///
/// The attributes are drawn uniformly from their allowed ranges.
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn generate(&mut self, n_packages: usize) -> Vec<Package> {
        (0..n_packages)
            .map(|_| {
                Package::builder()
                    .priority(self.rng.random_range(PRIORITIES))
                    .age(self.rng.random_range(AGES))
                    .weight(self.rng.random_range(WEIGHTS))
                    .build()
            })
            .collect()
    }
}

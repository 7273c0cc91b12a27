use std::{fs, ops::RangeInclusive, path::Path};

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Shipping priority, `3` is the highest.
pub const PRIORITIES: RangeInclusive<u8> = 1..=3;

/// Days since the order was placed.
pub const AGES: RangeInclusive<u8> = 0..=3;

pub const WEIGHTS: RangeInclusive<u32> = 1..=100;

#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, bon::Builder)]
pub struct Package {
    pub priority: u8,

    /// Days since the order was placed, older orders are more urgent.
    pub age: u8,

    pub weight: u32,
}

impl Package {
    pub fn validate(&self) -> Result {
        ensure!(
            PRIORITIES.contains(&self.priority),
            "priority `{}` is outside of {PRIORITIES:?}",
            self.priority,
        );
        ensure!(AGES.contains(&self.age), "age `{}` is outside of {AGES:?}", self.age);
        ensure!(
            WEIGHTS.contains(&self.weight),
            "weight `{}` is outside of {WEIGHTS:?}",
            self.weight,
        );
        Ok(())
    }
}

/// Package list as stored on disk.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub packages: Vec<Package>,
}

impl Manifest {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let manifest: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        manifest.validate()?;
        info!(n_packages = manifest.packages.len(), "loaded the manifest");
        Ok(manifest)
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn write_to(&self, path: &Path) -> Result {
        let contents = toml::to_string_pretty(self).context("failed to serialize the manifest")?;
        fs::write(path, contents).with_context(|| format!("failed to write `{}`", path.display()))?;
        info!(n_packages = self.packages.len(), "saved the manifest");
        Ok(())
    }

    fn validate(&self) -> Result {
        for (index, package) in self.packages.iter().enumerate() {
            package.validate().with_context(|| format!("package #{index} is invalid"))?;
        }
        Ok(())
    }
}

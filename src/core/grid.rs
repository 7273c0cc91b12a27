use serde::Serialize;

use crate::core::package::{AGES, PRIORITIES, Package};

/// Package counts by priority (rows: 3, 2, 1) and age (columns: 3, 2, 1, 0).
#[must_use]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ContingencyGrid([[usize; 4]; 3]);

impl<'a> FromIterator<&'a Package> for ContingencyGrid {
    fn from_iter<T: IntoIterator<Item = &'a Package>>(iter: T) -> Self {
        let mut grid = Self::default();
        for package in iter {
            grid.0[Self::row(package.priority)][Self::column(package.age)] += 1;
        }
        grid
    }
}

impl ContingencyGrid {
    fn row(priority: u8) -> usize {
        usize::from(PRIORITIES.end() - priority)
    }

    fn column(age: u8) -> usize {
        usize::from(AGES.end() - age)
    }

    #[cfg(test)]
    #[must_use]
    pub fn get(&self, priority: u8, age: u8) -> usize {
        self.0[Self::row(priority)][Self::column(age)]
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().flatten().sum()
    }

    /// Rows from the highest priority down, each paired with its priority.
    pub fn rows(&self) -> impl Iterator<Item = (u8, &[usize; 4])> {
        PRIORITIES.rev().zip(&self.0)
    }

    /// Column headers, the oldest orders first.
    pub fn ages() -> impl Iterator<Item = u8> {
        AGES.rev()
    }
}

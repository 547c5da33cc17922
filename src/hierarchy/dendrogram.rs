//! Dendrogram of multilevel community partitions.
//!
//! Each level is a partition of the *previous* level's communities:
//!
//! ```text
//! level 0: original node  -> community at level 0
//! level 1: level-0 label  -> community at level 1
//! level 2: level-1 label  -> community at level 2
//! ```
//!
//! Composing levels `0..=i` gives a flat partition of the original nodes.
//! Communities grow with the level; the last level is the coarsest.

use crate::error::{Error, Result};

/// One level of a [`Dendrogram`].
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// Community of each item of this level.
    pub partition: Vec<usize>,
    /// Signed modularity measured when the level was finalized.
    pub modularity: f64,
}

/// An ordered hierarchy of partitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dendrogram {
    levels: Vec<Level>,
}

impl Dendrogram {
    /// Create an empty dendrogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dendrogram from raw partitions, without modularity scores.
    ///
    /// The levels are not checked; projecting a malformed dendrogram fails in
    /// [`Dendrogram::partition_at_level`].
    pub fn from_partitions(partitions: Vec<Vec<usize>>) -> Self {
        Self {
            levels: partitions
                .into_iter()
                .map(|partition| Level {
                    partition,
                    modularity: f64::NAN,
                })
                .collect(),
        }
    }

    /// Append a level.
    pub fn push(&mut self, partition: Vec<usize>, modularity: f64) {
        self.levels.push(Level {
            partition,
            modularity,
        });
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether there are no levels.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level `i`.
    pub fn level(&self, i: usize) -> Option<&Level> {
        self.levels.get(i)
    }

    /// Iterate over levels, finest first.
    pub fn levels(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }

    /// The coarsest level.
    pub fn last(&self) -> Option<&Level> {
        self.levels.last()
    }

    /// Modularity recorded at each level.
    pub fn modularities(&self) -> Vec<f64> {
        self.levels.iter().map(|l| l.modularity).collect()
    }

    /// Flat partition of the original nodes at `level`.
    ///
    /// Starts from level 0 and maps every community through each following
    /// level up to and including `level`.
    pub fn partition_at_level(&self, level: usize) -> Result<Vec<usize>> {
        let n_levels = self.levels.len();
        if level >= n_levels {
            return Err(Error::LevelOutOfRange { level, n_levels });
        }

        let mut partition = self.levels[0].partition.clone();
        for (index, next) in self.levels.iter().enumerate().take(level + 1).skip(1) {
            for community in partition.iter_mut() {
                *community = next.partition.get(*community).copied().ok_or(
                    Error::CommunityNotFound {
                        level: index,
                        community: *community,
                    },
                )?;
            }
        }
        Ok(partition)
    }

    /// Flat partition at the coarsest level.
    pub fn best_partition(&self) -> Result<Vec<usize>> {
        self.partition_at_level(self.len().saturating_sub(1))
    }
}

/// Flat partition of the original nodes at `level` of `dendrogram`.
pub fn partition_at_level(dendrogram: &Dendrogram, level: usize) -> Result<Vec<usize>> {
    dendrogram.partition_at_level(level)
}

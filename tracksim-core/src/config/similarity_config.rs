//! Similarity matrix configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Batching, recycling and progress settings for the all-pairs build.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Appended entries per committed transaction. Default: 750000.
    pub flush_threshold: Option<usize>,
    /// Subjects between sink connection recycles. Default: 250.
    pub recycle_every: Option<usize>,
    /// Keep `(item, item)` entries. Default: false.
    pub include_self_pairs: Option<bool>,
    /// Compute rows of each recycle window on the rayon pool. Default: false.
    pub parallel: Option<bool>,
    /// Subjects between progress log lines. Default: 250.
    pub progress_interval: Option<usize>,
}

impl SimilarityConfig {
    pub fn effective_flush_threshold(&self) -> usize {
        self.flush_threshold
            .unwrap_or(constants::DEFAULT_FLUSH_THRESHOLD)
    }

    pub fn effective_recycle_every(&self) -> usize {
        self.recycle_every.unwrap_or(constants::DEFAULT_RECYCLE_EVERY)
    }

    pub fn effective_include_self_pairs(&self) -> bool {
        self.include_self_pairs
            .unwrap_or(constants::DEFAULT_INCLUDE_SELF_PAIRS)
    }

    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(constants::DEFAULT_PARALLEL)
    }

    pub fn effective_progress_interval(&self) -> usize {
        self.progress_interval
            .unwrap_or(constants::DEFAULT_PROGRESS_INTERVAL)
    }
}

//! Prediction configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PredictionConfig {
    /// CSV file predictions are written to. Default: `predictions.csv`.
    pub output_path: Option<String>,
    /// Fall back to user-based prediction when the item tier has no signal.
    /// Default: true.
    pub user_fallback: Option<bool>,
    /// Items whose similarity rows are cached during a run (0 disables).
    /// Default: 1024.
    pub similarity_cache_capacity: Option<u64>,
}

impl PredictionConfig {
    pub fn effective_output_path(&self) -> &str {
        self.output_path
            .as_deref()
            .unwrap_or(constants::DEFAULT_PREDICTIONS_PATH)
    }

    pub fn effective_user_fallback(&self) -> bool {
        self.user_fallback.unwrap_or(constants::DEFAULT_USER_FALLBACK)
    }

    pub fn effective_similarity_cache_capacity(&self) -> u64 {
        self.similarity_cache_capacity
            .unwrap_or(constants::DEFAULT_SIMILARITY_CACHE_CAPACITY)
    }
}

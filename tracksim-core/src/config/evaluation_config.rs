//! Evaluation configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Every Nth training row is held out. Default: 100.
    pub holdout_stride: Option<u32>,
    /// Prediction CSV to evaluate. Default: `predictions.csv`.
    pub predictions_path: Option<String>,
}

impl EvaluationConfig {
    pub fn effective_holdout_stride(&self) -> u32 {
        self.holdout_stride
            .unwrap_or(constants::DEFAULT_HOLDOUT_STRIDE)
    }

    pub fn effective_predictions_path(&self) -> &str {
        self.predictions_path
            .as_deref()
            .unwrap_or(constants::DEFAULT_PREDICTIONS_PATH)
    }
}

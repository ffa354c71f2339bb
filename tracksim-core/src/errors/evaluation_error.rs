//! Evaluation errors and alignment anomalies.

use serde::Serialize;

use super::error_code::{self, TracksimErrorCode};
use crate::types::{ItemId, UserId};

/// Errors that abort a metric computation.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("Predicted set has {predicted} entries but the held-out set has {actual}")]
    LengthMismatch { predicted: usize, actual: usize },

    #[error("Nothing to evaluate: the held-out set is empty")]
    EmptySample,
}

impl TracksimErrorCode for EvaluationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::LengthMismatch { .. } => error_code::LENGTH_MISMATCH,
            Self::EmptySample => error_code::EMPTY_SAMPLE,
        }
    }
}

/// A position where the predicted and actual entries disagree on identity.
/// Reported per occurrence; it does not abort the evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairMismatch {
    pub position: usize,
    pub predicted: (UserId, ItemId),
    pub actual: (UserId, ItemId),
}

impl std::fmt::Display for PairMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mismatching pair at {}: predicted ({}, {}) vs actual ({}, {})",
            self.position, self.predicted.0, self.predicted.1, self.actual.0, self.actual.1
        )
    }
}

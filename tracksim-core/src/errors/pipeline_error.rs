//! Top-level error for the similarity, prediction and evaluation runs.

use super::error_code::{self, TracksimErrorCode};
use super::{ConfigError, EvaluationError, StorageError};

/// Errors that can end a run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("Failed to render report: {message}")]
    Output { message: String },

    #[error("Run cancelled after {processed} subjects; resume from offset {processed}")]
    Cancelled { processed: usize },
}

impl TracksimErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Evaluation(e) => e.error_code(),
            Self::Output { .. } => error_code::OUTPUT_ERROR,
            Self::Cancelled { .. } => error_code::CANCELLED,
        }
    }
}

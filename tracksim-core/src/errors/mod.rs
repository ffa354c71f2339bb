//! Error handling for tracksim.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod evaluation_error;
pub mod pipeline_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::TracksimErrorCode;
pub use evaluation_error::{EvaluationError, PairMismatch};
pub use pipeline_error::PipelineError;
pub use storage_error::StorageError;

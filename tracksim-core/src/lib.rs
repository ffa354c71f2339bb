//! # tracksim-core
//!
//! Foundation crate for the tracksim collaborative-filtering engine.
//! Defines the rating types, collaborator traits, errors, config, events,
//! tracing setup, and constants. Every other crate in the workspace depends
//! on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::TracksimConfig;
pub use errors::{ConfigError, EvaluationError, PipelineError, StorageError};
pub use types::{
    ItemId, PredictedRating, Prediction, PredictionRequest, PredictionSource, Rating,
    SimilarityEntry, UserId,
};

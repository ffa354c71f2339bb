//! Configuration system for tracksim.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod evaluation_config;
pub mod prediction_config;
pub mod similarity_config;
pub mod storage_config;
pub mod tracksim_config;

pub use evaluation_config::EvaluationConfig;
pub use prediction_config::PredictionConfig;
pub use similarity_config::SimilarityConfig;
pub use storage_config::StorageConfig;
pub use tracksim_config::{CliOverrides, TracksimConfig};

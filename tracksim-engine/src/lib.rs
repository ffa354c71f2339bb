//! # tracksim-engine
//!
//! The collaborative-filtering engine: sparse rating indices, the Pearson
//! scorer, the all-pairs item similarity build, the two-tier rating
//! predictor and the hold-out evaluator. Storage is reached only through
//! the traits in `tracksim_core::traits`.

pub mod evaluation;
pub mod index;
pub mod matrix;
pub mod predictor;
pub mod scorer;

pub use evaluation::{EvaluationReport, Evaluator};
pub use index::{RatingIndex, RatingRow, RatingVector};
pub use matrix::{MatrixOptions, MatrixStats, SimilarityMatrixBuilder};
pub use predictor::{PredictionStats, PredictorOptions, RatingPredictor};
pub use scorer::pearson;

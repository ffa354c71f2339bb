use crate::errors::StorageError;
use crate::types::{PredictionRequest, Rating};

/// Read side of the rating store. Each method is a full scan; the engine
/// calls each at most once per run.
pub trait RatingSource {
    /// Every row of the training log, in storage order.
    fn training_ratings(&self) -> Result<Vec<Rating>, StorageError>;

    /// The `(user, item)` pairs to predict, ordered by user id.
    fn prediction_requests(&self) -> Result<Vec<PredictionRequest>, StorageError>;

    /// Every `stride`-th training row by row id, ordered by user id.
    fn holdout_sample(&self, stride: u32) -> Result<Vec<Rating>, StorageError>;
}

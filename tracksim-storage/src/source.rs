//! The SQLite store as the engine's rating source.

use tracksim_core::errors::StorageError;
use tracksim_core::traits::RatingSource;
use tracksim_core::types::{PredictionRequest, Rating};

use crate::connection::DatabaseManager;
use crate::queries::ratings;

impl RatingSource for DatabaseManager {
    fn training_ratings(&self) -> Result<Vec<Rating>, StorageError> {
        let rows = self.with_conn(ratings::load_training)?;
        tracing::info!(rows = rows.len(), "loaded training ratings");
        Ok(rows)
    }

    fn prediction_requests(&self) -> Result<Vec<PredictionRequest>, StorageError> {
        let rows = self.with_conn(ratings::load_requests)?;
        tracing::info!(rows = rows.len(), "loaded prediction requests");
        Ok(rows)
    }

    fn holdout_sample(&self, stride: u32) -> Result<Vec<Rating>, StorageError> {
        let rows = self.with_conn(|conn| ratings::load_holdout_sample(conn, stride))?;
        tracing::info!(rows = rows.len(), stride = stride, "loaded holdout sample");
        Ok(rows)
    }
}

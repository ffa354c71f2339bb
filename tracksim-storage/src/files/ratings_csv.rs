//! Import inputs: `user_id,item_id,rating` and `user_id,item_id`, no header.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracksim_core::errors::StorageError;
use tracksim_core::types::{ItemId, PredictionRequest, Rating, UserId};

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    let file_error = |message: String| StorageError::FileError {
        path: path.display().to_string(),
        message,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| file_error(e.to_string()))?;

    let mut rows = Vec::new();
    for record in reader.deserialize::<T>() {
        rows.push(record.map_err(|e| file_error(e.to_string()))?);
    }
    Ok(rows)
}

pub fn read_ratings_csv(path: &Path) -> Result<Vec<Rating>, StorageError> {
    Ok(read_rows::<(UserId, ItemId, i32)>(path)?
        .into_iter()
        .map(|(user_id, item_id, rating)| Rating::new(user_id, item_id, rating))
        .collect())
}

pub fn read_requests_csv(path: &Path) -> Result<Vec<PredictionRequest>, StorageError> {
    Ok(read_rows::<(UserId, ItemId)>(path)?
        .into_iter()
        .map(|(user_id, item_id)| PredictionRequest::new(user_id, item_id))
        .collect())
}

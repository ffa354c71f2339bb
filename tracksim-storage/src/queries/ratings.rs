//! training_data / test_data queries.

use rusqlite::{params, Connection};
use tracksim_core::errors::StorageError;
use tracksim_core::types::{PredictionRequest, Rating};

/// Load the whole training log in insertion order.
pub fn load_training(conn: &Connection) -> Result<Vec<Rating>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT user_id, item_id, rating FROM training_data ORDER BY row_id")
        .map_err(StorageError::sqlite)?;

    let rows = stmt
        .query_map([], |row| Ok(Rating::new(row.get(0)?, row.get(1)?, row.get(2)?)))
        .map_err(StorageError::sqlite)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(StorageError::sqlite)?);
    }
    Ok(result)
}

/// Load the pairs to predict, ordered by user id.
pub fn load_requests(conn: &Connection) -> Result<Vec<PredictionRequest>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT user_id, item_id FROM test_data ORDER BY user_id ASC, row_id ASC")
        .map_err(StorageError::sqlite)?;

    let rows = stmt
        .query_map([], |row| Ok(PredictionRequest::new(row.get(0)?, row.get(1)?)))
        .map_err(StorageError::sqlite)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(StorageError::sqlite)?);
    }
    Ok(result)
}

/// Every `stride`-th training row by row id, ordered by user id.
pub fn load_holdout_sample(conn: &Connection, stride: u32) -> Result<Vec<Rating>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT user_id, item_id, rating FROM training_data
             WHERE row_id % ?1 = 0
             ORDER BY user_id ASC, row_id ASC",
        )
        .map_err(StorageError::sqlite)?;

    let rows = stmt
        .query_map(params![stride.max(1)], |row| {
            Ok(Rating::new(row.get(0)?, row.get(1)?, row.get(2)?))
        })
        .map_err(StorageError::sqlite)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(StorageError::sqlite)?);
    }
    Ok(result)
}

/// Append rows to the training log. Returns the number inserted.
pub fn insert_training(conn: &Connection, ratings: &[Rating]) -> Result<usize, StorageError> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO training_data (user_id, item_id, rating) VALUES (?1, ?2, ?3)")
        .map_err(StorageError::sqlite)?;
    for r in ratings {
        stmt.execute(params![r.user_id, r.item_id, r.rating])
            .map_err(StorageError::sqlite)?;
    }
    Ok(ratings.len())
}

/// Append prediction requests. Returns the number inserted.
pub fn insert_requests(
    conn: &Connection,
    requests: &[PredictionRequest],
) -> Result<usize, StorageError> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO test_data (user_id, item_id) VALUES (?1, ?2)")
        .map_err(StorageError::sqlite)?;
    for r in requests {
        stmt.execute(params![r.user_id, r.item_id])
            .map_err(StorageError::sqlite)?;
    }
    Ok(requests.len())
}

pub fn count_training(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM training_data", [], |row| row.get(0))
        .map_err(StorageError::sqlite)
}

pub fn count_requests(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM test_data", [], |row| row.get(0))
        .map_err(StorageError::sqlite)
}

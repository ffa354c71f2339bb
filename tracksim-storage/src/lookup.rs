//! Subject-first similarity lookup backed by SQLite with a moka cache.

use std::sync::Arc;

use moka::sync::Cache;
use tracksim_core::errors::StorageError;
use tracksim_core::traits::{SimilarityLookup, SimilarityRow};
use tracksim_core::types::ItemId;

use crate::connection::DatabaseManager;
use crate::queries::similarities;

/// Reads similarity rows from `item_similarities`.
///
/// Prediction requests arrive ordered by user, so the same item is looked up
/// many times over a run; rows are cached by item id.
pub struct SqliteSimilarityLookup<'a> {
    db: &'a DatabaseManager,
    cache: Option<Cache<ItemId, Arc<SimilarityRow>>>,
}

impl<'a> SqliteSimilarityLookup<'a> {
    /// `cache_capacity` is the number of items kept; 0 disables caching.
    pub fn new(db: &'a DatabaseManager, cache_capacity: u64) -> Self {
        let cache = (cache_capacity > 0).then(|| Cache::new(cache_capacity));
        Self { db, cache }
    }

    fn load(&self, item: ItemId) -> Result<Arc<SimilarityRow>, StorageError> {
        let row = self
            .db
            .with_conn(|conn| similarities::for_subject(conn, item))?;
        Ok(Arc::new(row))
    }
}

impl SimilarityLookup for SqliteSimilarityLookup<'_> {
    fn similarities_for(&self, item: ItemId) -> Result<Arc<SimilarityRow>, StorageError> {
        match &self.cache {
            Some(cache) => {
                if let Some(row) = cache.get(&item) {
                    return Ok(row);
                }
                let row = self.load(item)?;
                cache.insert(item, Arc::clone(&row));
                Ok(row)
            }
            None => self.load(item),
        }
    }
}

//! Read side of the similarity table.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::{FxHashMap, ItemId, SimilarityEntry};

/// Peer item → score for one subject.
pub type SimilarityRow = FxHashMap<ItemId, f64>;

/// Subject-first lookup into the similarity table.
pub trait SimilarityLookup {
    /// All stored neighbours of `item`. Unknown items yield an empty row.
    fn similarities_for(&self, item: ItemId) -> Result<Arc<SimilarityRow>, StorageError>;
}

/// Similarity table held in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySimilarityLookup {
    rows: FxHashMap<ItemId, Arc<SimilarityRow>>,
    empty: Arc<SimilarityRow>,
}

impl MemorySimilarityLookup {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = SimilarityEntry>,
    {
        let mut rows: FxHashMap<ItemId, SimilarityRow> = FxHashMap::default();
        for e in entries {
            rows.entry(e.subject_id).or_default().insert(e.peer_id, e.score);
        }
        Self {
            rows: rows.into_iter().map(|(k, v)| (k, Arc::new(v))).collect(),
            empty: Arc::default(),
        }
    }
}

impl SimilarityLookup for MemorySimilarityLookup {
    fn similarities_for(&self, item: ItemId) -> Result<Arc<SimilarityRow>, StorageError> {
        Ok(self
            .rows
            .get(&item)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.empty)))
    }
}

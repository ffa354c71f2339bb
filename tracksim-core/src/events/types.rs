//! Event payload types.

use crate::types::{ItemId, PredictionSource, UserId};

/// Payload for `on_similarity_started`.
#[derive(Debug, Clone)]
pub struct SimilarityStartedEvent {
    pub total_subjects: usize,
    pub start_offset: usize,
}

/// Payload for `on_subject_processed`.
#[derive(Debug, Clone)]
pub struct SubjectProcessedEvent {
    pub subject_id: ItemId,
    /// Subjects done so far, counted from the start of the key set.
    pub processed: usize,
    pub total: usize,
    /// Entries appended for this subject.
    pub entries: usize,
}

/// Payload for `on_batch_committed`.
#[derive(Debug, Clone)]
pub struct BatchCommittedEvent {
    pub entries: usize,
    pub total_committed: u64,
}

/// Payload for `on_connection_cycled`.
#[derive(Debug, Clone)]
pub struct ConnectionCycledEvent {
    pub subjects_seen: usize,
}

/// Payload for `on_similarity_complete`.
#[derive(Debug, Clone)]
pub struct SimilarityCompleteEvent {
    pub subjects: usize,
    pub entries: u64,
    pub duration_ms: u64,
}

/// Payload for `on_prediction_emitted`.
#[derive(Debug, Clone)]
pub struct PredictionEmittedEvent {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub predicted_rating: f64,
    pub source: PredictionSource,
}

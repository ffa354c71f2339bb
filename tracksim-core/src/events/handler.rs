//! TracksimEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing builds and prediction runs.
///
/// Handlers only override the events they care about. `Send + Sync` so a
/// handler can be shared with the parallel similarity path.
pub trait TracksimEventHandler: Send + Sync {
    // ---- Similarity build ----
    fn on_similarity_started(&self, _event: &SimilarityStartedEvent) {}
    fn on_subject_processed(&self, _event: &SubjectProcessedEvent) {}
    fn on_similarity_complete(&self, _event: &SimilarityCompleteEvent) {}

    // ---- Sink ----
    fn on_batch_committed(&self, _event: &BatchCommittedEvent) {}
    fn on_connection_cycled(&self, _event: &ConnectionCycledEvent) {}

    // ---- Prediction ----
    fn on_prediction_emitted(&self, _event: &PredictionEmittedEvent) {}
}

//! EventDispatcher: synchronous event dispatch, free when empty.

use std::sync::Arc;

use super::handler::TracksimEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn TracksimEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn TracksimEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Handlers that panic are caught and do not prevent subsequent handlers
    /// from receiving the event.
    fn emit<F: Fn(&dyn TracksimEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("event handler panicked; continuing");
            }
        }
    }

    pub fn emit_similarity_started(&self, event: &SimilarityStartedEvent) {
        self.emit(|h| h.on_similarity_started(event));
    }

    pub fn emit_subject_processed(&self, event: &SubjectProcessedEvent) {
        self.emit(|h| h.on_subject_processed(event));
    }

    pub fn emit_similarity_complete(&self, event: &SimilarityCompleteEvent) {
        self.emit(|h| h.on_similarity_complete(event));
    }

    pub fn emit_batch_committed(&self, event: &BatchCommittedEvent) {
        self.emit(|h| h.on_batch_committed(event));
    }

    pub fn emit_connection_cycled(&self, event: &ConnectionCycledEvent) {
        self.emit(|h| h.on_connection_cycled(event));
    }

    pub fn emit_prediction_emitted(&self, event: &PredictionEmittedEvent) {
        self.emit(|h| h.on_prediction_emitted(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

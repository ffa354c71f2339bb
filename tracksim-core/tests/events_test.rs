//! Tests for the event dispatcher.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracksim_core::events::*;

#[derive(Default)]
struct CountingHandler {
    subjects: AtomicUsize,
    commits: AtomicUsize,
}

impl TracksimEventHandler for CountingHandler {
    fn on_subject_processed(&self, _event: &SubjectProcessedEvent) {
        self.subjects.fetch_add(1, Ordering::Relaxed);
    }

    fn on_batch_committed(&self, _event: &BatchCommittedEvent) {
        self.commits.fetch_add(1, Ordering::Relaxed);
    }
}

struct PanickingHandler;

impl TracksimEventHandler for PanickingHandler {
    fn on_subject_processed(&self, _event: &SubjectProcessedEvent) {
        panic!("handler failure");
    }
}

fn subject_event() -> SubjectProcessedEvent {
    SubjectProcessedEvent {
        subject_id: 7,
        processed: 1,
        total: 10,
        entries: 4,
    }
}

#[test]
fn empty_dispatcher_is_a_no_op() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.emit_subject_processed(&subject_event());
}

#[test]
fn registered_handlers_receive_events() {
    let handler = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(handler.clone());

    dispatcher.emit_subject_processed(&subject_event());
    dispatcher.emit_subject_processed(&subject_event());
    dispatcher.emit_batch_committed(&BatchCommittedEvent {
        entries: 10,
        total_committed: 10,
    });

    assert_eq!(handler.subjects.load(Ordering::Relaxed), 2);
    assert_eq!(handler.commits.load(Ordering::Relaxed), 1);
}

#[test]
fn panicking_handler_does_not_starve_later_handlers() {
    let counter = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(counter.clone());

    dispatcher.emit_subject_processed(&subject_event());

    assert_eq!(counter.subjects.load(Ordering::Relaxed), 1);
}

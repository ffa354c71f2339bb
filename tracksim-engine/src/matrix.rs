//! All-pairs item similarity build.
//!
//! Every ordered pair of items is scored, including both `(A, B)` and
//! `(B, A)`: the similarity table is read subject-first, so each subject
//! needs its full neighbour list. Only positive scores are kept.

use std::time::Instant;

use rayon::prelude::*;
use tracksim_core::config::SimilarityConfig;
use tracksim_core::constants;
use tracksim_core::errors::PipelineError;
use tracksim_core::events::{
    EventDispatcher, SimilarityCompleteEvent, SimilarityStartedEvent, SubjectProcessedEvent,
};
use tracksim_core::traits::{Cancellable, CancellationToken, SimilaritySink, SinkStats};
use tracksim_core::types::SimilarityEntry;

use crate::index::RatingIndex;
use crate::scorer::pearson;

/// Knobs for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixOptions {
    pub include_self_pairs: bool,
    /// Score each window of subjects on the rayon pool.
    pub parallel: bool,
    /// Subjects scored together in parallel mode.
    pub window: usize,
    /// Skip this many subjects of the ordered key set.
    pub start_offset: usize,
    /// Log progress every this many subjects.
    pub progress_interval: usize,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self {
            include_self_pairs: constants::DEFAULT_INCLUDE_SELF_PAIRS,
            parallel: constants::DEFAULT_PARALLEL,
            window: constants::DEFAULT_RECYCLE_EVERY,
            start_offset: 0,
            progress_interval: constants::DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl MatrixOptions {
    pub fn from_config(config: &SimilarityConfig) -> Self {
        Self {
            include_self_pairs: config.effective_include_self_pairs(),
            parallel: config.effective_parallel(),
            window: config.effective_recycle_every().max(1),
            start_offset: 0,
            progress_interval: config.effective_progress_interval().max(1),
        }
    }

    pub fn with_start_offset(mut self, start_offset: usize) -> Self {
        self.start_offset = start_offset;
        self
    }
}

/// Outcome of a completed build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixStats {
    /// Subjects scored by this run.
    pub subjects: usize,
    /// Absolute position reached in the key set.
    pub processed: usize,
    pub total_subjects: usize,
    pub entries: u64,
    pub sink: SinkStats,
    pub duration_ms: u64,
}

/// Scores every item against every other item of a by-item index.
pub struct SimilarityMatrixBuilder<'a> {
    index: &'a RatingIndex,
    options: MatrixOptions,
    events: EventDispatcher,
    cancel: CancellationToken,
}

impl<'a> SimilarityMatrixBuilder<'a> {
    pub fn new(index: &'a RatingIndex, options: MatrixOptions) -> Self {
        Self {
            index,
            options: MatrixOptions {
                window: options.window.max(1),
                progress_interval: options.progress_interval.max(1),
                ..options
            },
            events: EventDispatcher::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    /// Share a token the caller can cancel from elsewhere.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn options(&self) -> &MatrixOptions {
        &self.options
    }

    /// Run the build into `sink`.
    ///
    /// The sink is finished on success and on cancellation; on cancellation
    /// the error carries the offset to resume from.
    pub fn build<S: SimilaritySink>(&self, sink: &mut S) -> Result<MatrixStats, PipelineError> {
        let started = Instant::now();
        let keys = self.index.keys();
        let total = keys.len();
        let start = self.options.start_offset.min(total);
        let chunk = if self.options.parallel {
            self.options.window
        } else {
            1
        };

        tracing::info!(
            subjects_total = total,
            start_offset = start,
            parallel = self.options.parallel,
            include_self_pairs = self.options.include_self_pairs,
            "similarity build started"
        );
        self.events.emit_similarity_started(&SimilarityStartedEvent {
            total_subjects: total,
            start_offset: start,
        });

        let mut processed = start;
        let mut entries = 0u64;

        for window_start in (start..total).step_by(chunk) {
            if self.cancel.is_cancelled() {
                return Err(self.cancelled(sink, processed));
            }
            let window_end = (window_start + chunk).min(total);
            let rows = self.score_window(window_start, window_end);

            for (offset, row) in rows.into_iter().enumerate() {
                if offset > 0 && self.cancel.is_cancelled() {
                    return Err(self.cancelled(sink, processed));
                }
                let position = window_start + offset;
                let subject = keys[position];
                let appended = row.len();
                for entry in row {
                    sink.append(entry)?;
                }
                sink.subject_complete(subject)?;

                processed = position + 1;
                entries += appended as u64;
                self.events.emit_subject_processed(&SubjectProcessedEvent {
                    subject_id: subject,
                    processed,
                    total,
                    entries: appended,
                });
                if processed % self.options.progress_interval == 0 {
                    tracing::info!(
                        subjects_processed = processed,
                        subjects_total = total,
                        entries_appended = entries,
                        "similarity progress"
                    );
                }
            }
        }

        let sink_stats = sink.finish()?;
        let duration_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            subjects_processed = processed,
            entries_appended = entries,
            committed = sink_stats.committed,
            duration_ms = duration_ms,
            "similarity build complete"
        );
        self.events.emit_similarity_complete(&SimilarityCompleteEvent {
            subjects: processed - start,
            entries,
            duration_ms,
        });

        Ok(MatrixStats {
            subjects: processed - start,
            processed,
            total_subjects: total,
            entries,
            sink: sink_stats,
            duration_ms,
        })
    }

    fn score_window(&self, start: usize, end: usize) -> Vec<Vec<SimilarityEntry>> {
        let index = self.index;
        let include_self = self.options.include_self_pairs;
        if self.options.parallel && end - start > 1 {
            (start..end)
                .into_par_iter()
                .map(|position| score_subject(index, position, include_self))
                .collect()
        } else {
            (start..end)
                .map(|position| score_subject(index, position, include_self))
                .collect()
        }
    }

    fn cancelled<S: SimilaritySink>(&self, sink: &mut S, processed: usize) -> PipelineError {
        if let Err(e) = sink.finish() {
            tracing::error!(error = %e, "failed to commit sink after cancellation");
            return e.into();
        }
        tracing::warn!(
            subjects_processed = processed,
            resume_from = processed,
            "similarity build cancelled"
        );
        PipelineError::Cancelled { processed }
    }
}

/// Positive-score entries of the subject at `position`, in peer order.
fn score_subject(index: &RatingIndex, position: usize, include_self: bool) -> Vec<SimilarityEntry> {
    let keys = index.keys();
    let subject = keys[position];
    let subject_row = index.row(position);

    let mut row = Vec::new();
    for (peer_position, &peer) in keys.iter().enumerate() {
        if peer_position == position && !include_self {
            continue;
        }
        let score = pearson(subject_row, index.row(peer_position));
        if score > 0.0 {
            row.push(SimilarityEntry {
                subject_id: subject,
                peer_id: peer,
                score,
            });
        }
    }
    row
}

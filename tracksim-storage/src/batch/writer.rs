//! SimilarityBatchWriter: transactional batch writer over a dedicated
//! connection.
//!
//! Entries are inserted inside an open transaction that is committed every
//! `flush_threshold` entries. Every `recycle_every` completed subjects the
//! writer commits, closes its connection and opens a fresh one, which bounds
//! whatever state the connection accumulates over a very long build.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rusqlite::Connection;
use tracksim_core::config::{SimilarityConfig, StorageConfig};
use tracksim_core::constants;
use tracksim_core::errors::StorageError;
use tracksim_core::events::{BatchCommittedEvent, ConnectionCycledEvent, EventDispatcher};
use tracksim_core::traits::{SimilaritySink, SinkStats};
use tracksim_core::types::{ItemId, SimilarityEntry};

use crate::connection::pragmas::{apply_pragmas, optimize_on_close};
use crate::queries::similarities;

/// Thresholds for [`SimilarityBatchWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchWriterConfig {
    /// Entries per committed transaction.
    pub flush_threshold: usize,
    /// Completed subjects between connection recycles.
    pub recycle_every: usize,
    pub busy_timeout_ms: u32,
}

impl Default for BatchWriterConfig {
    fn default() -> Self {
        Self {
            flush_threshold: constants::DEFAULT_FLUSH_THRESHOLD,
            recycle_every: constants::DEFAULT_RECYCLE_EVERY,
            busy_timeout_ms: constants::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl BatchWriterConfig {
    pub fn from_config(similarity: &SimilarityConfig, storage: &StorageConfig) -> Self {
        Self {
            flush_threshold: similarity.effective_flush_threshold().max(1),
            recycle_every: similarity.effective_recycle_every().max(1),
            busy_timeout_ms: storage.effective_busy_timeout_ms(),
        }
    }
}

/// Appends similarity entries with bounded transactions.
pub struct SimilarityBatchWriter {
    conn: Connection,
    /// `None` for in-memory connections, which cannot be reopened.
    path: Option<PathBuf>,
    config: BatchWriterConfig,
    in_transaction: bool,
    pending: usize,
    subjects_since_recycle: usize,
    subjects_seen: usize,
    stats: SinkStats,
    events: EventDispatcher,
}

impl SimilarityBatchWriter {
    /// Open a writer on its own connection to the database at `path`.
    pub fn open(path: &Path, config: BatchWriterConfig) -> Result<Self, StorageError> {
        let conn = open_connection(path, config.busy_timeout_ms)?;
        Ok(Self::new(conn, Some(path.to_path_buf()), config))
    }

    /// Wrap an existing connection. Recycling commits but keeps the
    /// connection, since it cannot be reopened.
    pub fn from_connection(conn: Connection, config: BatchWriterConfig) -> Self {
        Self::new(conn, None, config)
    }

    fn new(conn: Connection, path: Option<PathBuf>, config: BatchWriterConfig) -> Self {
        Self {
            conn,
            path,
            config: BatchWriterConfig {
                flush_threshold: config.flush_threshold.max(1),
                recycle_every: config.recycle_every.max(1),
                ..config
            },
            in_transaction: false,
            pending: 0,
            subjects_since_recycle: 0,
            subjects_seen: 0,
            stats: SinkStats::default(),
            events: EventDispatcher::new(),
        }
    }

    /// Attach an event dispatcher for commit and recycle notifications.
    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    /// Counters so far.
    pub fn stats(&self) -> SinkStats {
        self.stats
    }

    /// Entries inserted in the open transaction.
    pub fn pending(&self) -> usize {
        self.pending
    }

    fn begin(&mut self) -> Result<(), StorageError> {
        self.conn
            .execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| StorageError::SqliteError {
                message: format!("failed to begin batch transaction: {e}"),
            })?;
        self.in_transaction = true;
        Ok(())
    }

    /// Commit the open transaction, if any.
    pub fn commit(&mut self) -> Result<(), StorageError> {
        if !self.in_transaction {
            return Ok(());
        }
        let start = Instant::now();
        self.conn
            .execute_batch("COMMIT")
            .map_err(|e| StorageError::SqliteError {
                message: format!("failed to commit batch: {e}"),
            })?;
        self.in_transaction = false;

        let entries = self.pending;
        self.pending = 0;
        self.stats.committed += entries as u64;
        self.stats.flushes += 1;

        tracing::info!(
            batch_size = entries,
            total_committed = self.stats.committed,
            batch_write_time = start.elapsed().as_millis() as u64,
            "committed similarity batch"
        );
        self.events.emit_batch_committed(&BatchCommittedEvent {
            entries,
            total_committed: self.stats.committed,
        });
        Ok(())
    }

    /// Commit, close the connection and open a fresh one.
    fn recycle(&mut self) -> Result<(), StorageError> {
        self.commit()?;
        if let Some(path) = &self.path {
            let fresh = open_connection(path, self.config.busy_timeout_ms)?;
            let old = std::mem::replace(&mut self.conn, fresh);
            if let Err(e) = optimize_on_close(&old) {
                tracing::debug!(error = %e, "optimize before close failed");
            }
            old.close().map_err(|(_, e)| StorageError::SqliteError {
                message: format!("failed to close batch connection: {e}"),
            })?;
            tracing::info!(subjects_seen = self.subjects_seen, "recycled sink connection");
        }
        self.stats.recycles += 1;
        self.subjects_since_recycle = 0;
        self.events.emit_connection_cycled(&ConnectionCycledEvent {
            subjects_seen: self.subjects_seen,
        });
        Ok(())
    }
}

impl SimilaritySink for SimilarityBatchWriter {
    fn append(&mut self, entry: SimilarityEntry) -> Result<(), StorageError> {
        if !self.in_transaction {
            self.begin()?;
        }
        similarities::insert(&self.conn, &entry)?;
        self.pending += 1;
        self.stats.appended += 1;
        if self.pending >= self.config.flush_threshold {
            self.commit()?;
        }
        Ok(())
    }

    fn subject_complete(&mut self, subject: ItemId) -> Result<(), StorageError> {
        self.subjects_seen += 1;
        self.subjects_since_recycle += 1;
        tracing::trace!(subject_id = subject, "subject complete");
        if self.subjects_since_recycle >= self.config.recycle_every {
            self.recycle()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<SinkStats, StorageError> {
        self.commit()?;
        Ok(self.stats)
    }
}

impl Drop for SimilarityBatchWriter {
    fn drop(&mut self) {
        if self.in_transaction && self.pending > 0 {
            tracing::warn!(
                lost = self.pending,
                "batch writer dropped with uncommitted entries"
            );
        }
    }
}

fn open_connection(path: &Path, busy_timeout_ms: u32) -> Result<Connection, StorageError> {
    let conn = Connection::open(path).map_err(|e| StorageError::SqliteError {
        message: format!("open batch connection: {e}"),
    })?;
    apply_pragmas(&conn, busy_timeout_ms)?;
    Ok(conn)
}

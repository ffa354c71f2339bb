//! Destination of the similarity build.

use serde::Serialize;

use crate::errors::StorageError;
use crate::types::{ItemId, SimilarityEntry};

/// Counters reported by a sink when it finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SinkStats {
    /// Entries handed to `append`.
    pub appended: u64,
    /// Entries known to be durable.
    pub committed: u64,
    /// Transactions committed.
    pub flushes: usize,
    /// Connection close/reopen cycles.
    pub recycles: usize,
}

/// Appendable similarity table with batched commits.
///
/// Entries appended but not yet committed are lost if the process dies;
/// callers recover by clearing the table and re-running.
pub trait SimilaritySink {
    fn append(&mut self, entry: SimilarityEntry) -> Result<(), StorageError>;

    /// Called once all entries of `subject` have been appended.
    fn subject_complete(&mut self, subject: ItemId) -> Result<(), StorageError>;

    /// Commit whatever is still buffered.
    fn finish(&mut self) -> Result<SinkStats, StorageError>;
}

/// Collects entries in memory. Used by tests and benchmarks.
#[derive(Debug, Default)]
pub struct MemorySimilaritySink {
    pub entries: Vec<SimilarityEntry>,
    pub completed_subjects: Vec<ItemId>,
    committed: usize,
    flushes: usize,
    finished: bool,
}

impl MemorySimilaritySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl SimilaritySink for MemorySimilaritySink {
    fn append(&mut self, entry: SimilarityEntry) -> Result<(), StorageError> {
        self.entries.push(entry);
        Ok(())
    }

    fn subject_complete(&mut self, subject: ItemId) -> Result<(), StorageError> {
        self.completed_subjects.push(subject);
        Ok(())
    }

    fn finish(&mut self) -> Result<SinkStats, StorageError> {
        self.finished = true;
        // Nothing new since the last finish means nothing to commit.
        if self.entries.len() > self.committed {
            self.committed = self.entries.len();
            self.flushes += 1;
        }
        Ok(SinkStats {
            appended: self.entries.len() as u64,
            committed: self.committed as u64,
            flushes: self.flushes,
            recycles: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_finish_commits_nothing() {
        let mut sink = MemorySimilaritySink::new();
        let stats = sink.finish().unwrap();
        assert_eq!(stats, SinkStats::default());
        assert!(sink.is_finished());
    }

    #[test]
    fn finish_counts_only_new_entries() {
        let mut sink = MemorySimilaritySink::new();
        sink.append(SimilarityEntry::new(1, 2, 0.5)).unwrap();
        sink.append(SimilarityEntry::new(2, 1, 0.5)).unwrap();
        let first = sink.finish().unwrap();
        assert_eq!((first.appended, first.committed, first.flushes), (2, 2, 1));

        let again = sink.finish().unwrap();
        assert_eq!(again, first);

        sink.append(SimilarityEntry::new(3, 1, -0.25)).unwrap();
        let resumed = sink.finish().unwrap();
        assert_eq!(
            (resumed.appended, resumed.committed, resumed.flushes),
            (3, 3, 2)
        );
    }
}

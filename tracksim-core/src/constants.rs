//! Shared constants for the tracksim engine.

/// Default SQLite database file.
pub const DEFAULT_DB_PATH: &str = "rating_data.db";

/// Default busy timeout for SQLite connections in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// ---- Similarity matrix ----

/// Appended similarity entries per committed transaction.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 750_000;

/// Subjects processed between sink connection recycles.
pub const DEFAULT_RECYCLE_EVERY: usize = 250;

/// Subjects processed between progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 250;

/// Self-pairs (subject == peer) are left out of the similarity table.
pub const DEFAULT_INCLUDE_SELF_PAIRS: bool = false;

/// Outer loop runs on the calling thread.
pub const DEFAULT_PARALLEL: bool = false;

// ---- Prediction ----

/// Default prediction output file.
pub const DEFAULT_PREDICTIONS_PATH: &str = "predictions.csv";

/// User-based fallback is enabled.
pub const DEFAULT_USER_FALLBACK: bool = true;

/// Items whose similarity rows are kept in the lookup cache.
pub const DEFAULT_SIMILARITY_CACHE_CAPACITY: u64 = 1_024;

// ---- Evaluation ----

/// Every Nth training row (by row id) is held out for evaluation.
pub const DEFAULT_HOLDOUT_STRIDE: u32 = 100;

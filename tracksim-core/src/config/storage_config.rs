//! Storage configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the SQLite rating store.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database. Default: `rating_data.db`.
    pub db_path: Option<String>,
    /// Busy timeout in milliseconds. Default: 5000.
    pub busy_timeout_ms: Option<u32>,
}

impl StorageConfig {
    pub fn effective_db_path(&self) -> &str {
        self.db_path.as_deref().unwrap_or(constants::DEFAULT_DB_PATH)
    }

    pub fn effective_busy_timeout_ms(&self) -> u32 {
        self.busy_timeout_ms
            .unwrap_or(constants::DEFAULT_BUSY_TIMEOUT_MS)
    }
}

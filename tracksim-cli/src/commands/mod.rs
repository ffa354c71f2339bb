//! Subcommand implementations.

pub mod evaluate;
pub mod import;
pub mod predict;
pub mod similarities;

use std::path::Path;

use tracksim_core::config::TracksimConfig;
use tracksim_core::errors::StorageError;
use tracksim_storage::DatabaseManager;

/// Open the configured database, which must already exist.
pub(crate) fn open_existing(config: &TracksimConfig) -> Result<DatabaseManager, StorageError> {
    DatabaseManager::open_existing(
        Path::new(config.storage.effective_db_path()),
        config.storage.effective_busy_timeout_ms(),
    )
}

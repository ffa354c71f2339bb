//! Storage errors: SQLite store and flat files.

use super::error_code::{self, TracksimErrorCode};

/// Errors raised by the rating store, the similarity sink and the
/// prediction files. All of them are infrastructure faults and fatal.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Rating source unavailable at {path}: {message}")]
    SourceUnavailable { path: String, message: String },

    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("File error in {path}: {message}")]
    FileError { path: String, message: String },
}

impl StorageError {
    /// Shorthand used by the query modules.
    pub fn sqlite(e: impl std::fmt::Display) -> Self {
        Self::SqliteError {
            message: e.to_string(),
        }
    }
}

impl TracksimErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => error_code::SOURCE_UNAVAILABLE,
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::FileError { .. } => error_code::FILE_ERROR,
        }
    }
}

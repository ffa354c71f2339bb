//! Connection management for the rating store.

pub mod pragmas;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};
use tracksim_core::constants::DEFAULT_BUSY_TIMEOUT_MS;
use tracksim_core::errors::StorageError;

use self::pragmas::apply_pragmas;
use crate::batch::{BatchWriterConfig, SimilarityBatchWriter};
use crate::migrations;

/// Owns the main connection to the rating store.
///
/// The similarity build writes through its own connection (see
/// [`DatabaseManager::batch_writer`]) so that it can be recycled without
/// touching this one.
pub struct DatabaseManager {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
    busy_timeout_ms: u32,
}

impl DatabaseManager {
    /// Open (creating if needed) a database, apply pragmas, run migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT_MS)
    }

    /// Like [`DatabaseManager::open`] with an explicit busy timeout.
    pub fn open_with_timeout(path: &Path, busy_timeout_ms: u32) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| StorageError::SourceUnavailable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::init(conn, Some(path.to_path_buf()), busy_timeout_ms)
    }

    /// Open a database that must already exist. A missing or unreadable file
    /// is `SourceUnavailable`: the engine has nothing to work from.
    pub fn open_existing(path: &Path, busy_timeout_ms: u32) -> Result<Self, StorageError> {
        let unavailable = |message: String| StorageError::SourceUnavailable {
            path: path.display().to_string(),
            message,
        };
        if !path.is_file() {
            return Err(unavailable("no such database file".to_string()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| unavailable(e.to_string()))?;
        Self::init(conn, Some(path.to_path_buf()), busy_timeout_ms)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::sqlite)?;
        Self::init(conn, None, DEFAULT_BUSY_TIMEOUT_MS)
    }

    fn init(
        conn: Connection,
        path: Option<PathBuf>,
        busy_timeout_ms: u32,
    ) -> Result<Self, StorageError> {
        apply_pragmas(&conn, busy_timeout_ms)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path,
            busy_timeout_ms,
        })
    }

    /// Execute an operation on the main connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.conn.lock().map_err(|_| StorageError::SqliteError {
            message: "connection lock poisoned".to_string(),
        })?;
        f(&guard)
    }

    /// Run a WAL checkpoint (TRUNCATE mode), e.g. after a similarity build.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.with_conn(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
                .map_err(StorageError::sqlite)
        })
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn busy_timeout_ms(&self) -> u32 {
        self.busy_timeout_ms
    }

    /// Open a batch writer on a dedicated connection to the same file.
    ///
    /// In-memory databases cannot be shared between connections, so the
    /// writer requires a file-backed database.
    pub fn batch_writer(
        &self,
        config: BatchWriterConfig,
    ) -> Result<SimilarityBatchWriter, StorageError> {
        match &self.path {
            Some(path) => SimilarityBatchWriter::open(path, config),
            None => Err(StorageError::SqliteError {
                message: "batch writer requires a file-backed database".to_string(),
            }),
        }
    }
}

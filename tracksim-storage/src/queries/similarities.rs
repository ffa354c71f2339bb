//! item_similarities queries.

use rusqlite::{params, Connection};
use tracksim_core::errors::StorageError;
use tracksim_core::traits::SimilarityRow;
use tracksim_core::types::{ItemId, SimilarityEntry};

use crate::connection::writer::with_immediate_transaction;

const INSERT_SQL: &str =
    "INSERT INTO item_similarities (subject_id, peer_id, score) VALUES (?1, ?2, ?3)";

/// Insert one entry. Callers own the surrounding transaction.
pub fn insert(conn: &Connection, entry: &SimilarityEntry) -> Result<(), StorageError> {
    conn.prepare_cached(INSERT_SQL)
        .and_then(|mut stmt| stmt.execute(params![entry.subject_id, entry.peer_id, entry.score]))
        .map_err(StorageError::sqlite)?;
    Ok(())
}

/// Insert a slice of entries in one transaction. Returns the number inserted.
pub fn insert_many(conn: &Connection, entries: &[SimilarityEntry]) -> Result<usize, StorageError> {
    with_immediate_transaction(conn, |tx| {
        for entry in entries {
            insert(tx, entry)?;
        }
        Ok(entries.len())
    })
}

/// All neighbours of `subject` as peer → score.
pub fn for_subject(conn: &Connection, subject: ItemId) -> Result<SimilarityRow, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT peer_id, score FROM item_similarities WHERE subject_id = ?1")
        .map_err(StorageError::sqlite)?;

    let rows = stmt
        .query_map(params![subject], |row| {
            Ok((row.get::<_, ItemId>(0)?, row.get::<_, f64>(1)?))
        })
        .map_err(StorageError::sqlite)?;

    let mut result = SimilarityRow::default();
    for row in rows {
        let (peer, score) = row.map_err(StorageError::sqlite)?;
        result.insert(peer, score);
    }
    Ok(result)
}

/// Every stored entry ordered by (subject, peer).
pub fn load_all(conn: &Connection) -> Result<Vec<SimilarityEntry>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT subject_id, peer_id, score FROM item_similarities
             ORDER BY subject_id, peer_id",
        )
        .map_err(StorageError::sqlite)?;

    let rows = stmt
        .query_map([], |row| {
            Ok(SimilarityEntry {
                subject_id: row.get(0)?,
                peer_id: row.get(1)?,
                score: row.get(2)?,
            })
        })
        .map_err(StorageError::sqlite)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(StorageError::sqlite)?);
    }
    Ok(result)
}

pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM item_similarities", [], |row| row.get(0))
        .map_err(StorageError::sqlite)
}

/// Remove all entries. Required before a fresh build: the table is
/// append-only and a re-run would otherwise duplicate rows.
pub fn clear(conn: &Connection) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM item_similarities", [])
        .map_err(StorageError::sqlite)
}

/// Remove entries of subjects at or after `subject`, e.g. the partially
/// written subject of an interrupted build before resuming.
pub fn clear_from_subject(conn: &Connection, subject: ItemId) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM item_similarities WHERE subject_id >= ?1",
        params![subject],
    )
    .map_err(StorageError::sqlite)
}

/// Highest subject with at least one stored entry.
pub fn max_subject(conn: &Connection) -> Result<Option<ItemId>, StorageError> {
    conn.query_row("SELECT MAX(subject_id) FROM item_similarities", [], |row| {
        row.get::<_, Option<ItemId>>(0)
    })
    .map_err(StorageError::sqlite)
}

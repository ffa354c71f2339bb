//! v002: item similarity table, looked up by subject.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS item_similarities (
    subject_id INTEGER NOT NULL,
    peer_id    INTEGER NOT NULL,
    score      REAL    NOT NULL CHECK (score > 0)
);
CREATE INDEX IF NOT EXISTS idx_item_similarities_subject
    ON item_similarities(subject_id);
";

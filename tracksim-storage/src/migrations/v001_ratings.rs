//! v001: training log and prediction requests.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS training_data (
    row_id  INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    item_id INTEGER NOT NULL,
    rating  INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_training_data_user ON training_data(user_id);

CREATE TABLE IF NOT EXISTS test_data (
    row_id  INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    item_id INTEGER NOT NULL
);
";

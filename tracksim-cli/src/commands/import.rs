//! `tracksim import`

use std::path::Path;

use tracksim_core::config::TracksimConfig;
use tracksim_core::errors::PipelineError;
use tracksim_storage::connection::writer::with_immediate_transaction;
use tracksim_storage::files::{read_ratings_csv, read_requests_csv};
use tracksim_storage::queries::ratings;
use tracksim_storage::DatabaseManager;

pub fn run(
    config: &TracksimConfig,
    training: &Path,
    test: Option<&Path>,
) -> Result<(), PipelineError> {
    let training_rows = read_ratings_csv(training)?;
    let test_rows = match test {
        Some(path) => read_requests_csv(path)?,
        None => Vec::new(),
    };

    let db = DatabaseManager::open_with_timeout(
        Path::new(config.storage.effective_db_path()),
        config.storage.effective_busy_timeout_ms(),
    )?;
    let (inserted_training, inserted_test) = db.with_conn(|conn| {
        with_immediate_transaction(conn, |tx| {
            let t = ratings::insert_training(tx, &training_rows)?;
            let r = ratings::insert_requests(tx, &test_rows)?;
            Ok((t, r))
        })
    })?;

    tracing::info!(
        training = inserted_training,
        test = inserted_test,
        db = config.storage.effective_db_path(),
        "import complete"
    );
    println!("Imported {inserted_training} ratings and {inserted_test} prediction requests");
    Ok(())
}

//! `tracksim similarities`

use tracksim_core::config::TracksimConfig;
use tracksim_core::errors::PipelineError;
use tracksim_core::traits::RatingSource;
use tracksim_engine::{MatrixOptions, RatingIndex, SimilarityMatrixBuilder};
use tracksim_storage::queries::similarities;
use tracksim_storage::BatchWriterConfig;

use super::open_existing;

pub fn run(
    config: &TracksimConfig,
    clear: bool,
    resume_from: Option<usize>,
) -> Result<(), PipelineError> {
    let db = open_existing(config)?;
    let by_item = RatingIndex::by_item(&db.training_ratings()?);

    if clear {
        let removed = db.with_conn(similarities::clear)?;
        tracing::info!(removed = removed, "cleared similarity table");
    } else if resume_from.is_none() {
        if let Some(last) = db.with_conn(similarities::max_subject)? {
            let offset = suggested_resume_offset(by_item.keys(), last);
            tracing::warn!(
                last_subject = last,
                suggested_resume_from = offset,
                "similarity table is not empty; entries will be duplicated"
            );
            eprintln!(
                "Warning: similarity table already holds entries up to item {last}; \
                 use --clear for a fresh build or --resume-from {offset} to continue"
            );
        }
    }

    let start_offset = resume_from.unwrap_or(0);
    // The subject at the resume offset may have been partially written.
    if let Some(&subject) = by_item.keys().get(start_offset) {
        if start_offset > 0 {
            let removed = db.with_conn(|conn| similarities::clear_from_subject(conn, subject))?;
            tracing::info!(subject_id = subject, removed = removed, "dropped partial subjects");
        }
    }

    let options = MatrixOptions::from_config(&config.similarity).with_start_offset(start_offset);
    let mut writer = db.batch_writer(BatchWriterConfig::from_config(
        &config.similarity,
        &config.storage,
    ))?;
    let stats = SimilarityMatrixBuilder::new(&by_item, options).build(&mut writer)?;
    drop(writer);
    db.checkpoint()?;

    println!(
        "Scored {} of {} items: {} similarities stored in {} ms",
        stats.subjects, stats.total_subjects, stats.sink.committed, stats.duration_ms
    );
    Ok(())
}

/// Position of `last_subject` in the ordered key set: the last stored subject
/// may be incomplete, so a resumed build starts over at it.
fn suggested_resume_offset(keys: &[i64], last_subject: i64) -> usize {
    keys.partition_point(|&key| key < last_subject)
}

#[cfg(test)]
mod tests {
    use super::suggested_resume_offset;

    #[test]
    fn resume_restarts_at_last_stored_subject() {
        let keys = [3, 8, 12, 40];
        assert_eq!(suggested_resume_offset(&keys, 3), 0);
        assert_eq!(suggested_resume_offset(&keys, 12), 2);
        assert_eq!(suggested_resume_offset(&keys, 40), 3);
        // A subject no longer in the log resumes at the next one.
        assert_eq!(suggested_resume_offset(&keys, 9), 2);
    }
}

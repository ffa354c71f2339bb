//! Rating and similarity table queries.

use tracksim_core::traits::RatingSource;
use tracksim_core::types::{PredictionRequest, Rating, SimilarityEntry};
use tracksim_storage::connection::writer::with_immediate_transaction;
use tracksim_storage::queries::{ratings, similarities};
use tracksim_storage::DatabaseManager;

fn seeded() -> DatabaseManager {
    let db = DatabaseManager::open_in_memory().unwrap();
    db.with_conn(|conn| {
        ratings::insert_training(
            conn,
            &[
                Rating::new(2, 10, 4),
                Rating::new(1, 10, 5),
                Rating::new(2, 11, 3),
                Rating::new(1, 12, 1),
                Rating::new(3, 10, 2),
                Rating::new(1, 11, 4),
            ],
        )?;
        ratings::insert_requests(
            conn,
            &[
                PredictionRequest::new(3, 11),
                PredictionRequest::new(1, 13),
                PredictionRequest::new(3, 12),
            ],
        )
    })
    .unwrap();
    db
}

#[test]
fn training_rows_come_back_in_log_order() {
    let db = seeded();
    let rows = db.training_ratings().unwrap();

    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0], Rating::new(2, 10, 4));
    assert_eq!(rows[5], Rating::new(1, 11, 4));
    assert_eq!(db.with_conn(ratings::count_training).unwrap(), 6);
}

#[test]
fn requests_are_ordered_by_user_then_insertion() {
    let db = seeded();
    let requests = db.prediction_requests().unwrap();

    assert_eq!(
        requests,
        vec![
            PredictionRequest::new(1, 13),
            PredictionRequest::new(3, 11),
            PredictionRequest::new(3, 12),
        ]
    );
    assert_eq!(db.with_conn(ratings::count_requests).unwrap(), 3);
}

#[test]
fn holdout_takes_every_nth_row_by_row_id() {
    let db = seeded();
    let sample = db.holdout_sample(2).unwrap();

    // Row ids 2, 4 and 6, re-ordered by user.
    assert_eq!(
        sample,
        vec![
            Rating::new(1, 10, 5),
            Rating::new(1, 12, 1),
            Rating::new(1, 11, 4),
        ]
    );
    assert_eq!(db.holdout_sample(1).unwrap().len(), 6);
    assert!(db.holdout_sample(100).unwrap().is_empty());
}

#[test]
fn similarity_rows_are_read_by_subject() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let entries = [
        SimilarityEntry::new(1, 2, 0.5),
        SimilarityEntry::new(1, 3, 0.25),
        SimilarityEntry::new(2, 1, 0.5),
    ];
    let inserted = db
        .with_conn(|conn| similarities::insert_many(conn, &entries))
        .unwrap();
    assert_eq!(inserted, 3);

    let row = db.with_conn(|conn| similarities::for_subject(conn, 1)).unwrap();
    assert_eq!(row.len(), 2);
    assert_eq!(row[&2], 0.5);
    assert_eq!(row[&3], 0.25);
    assert!(db
        .with_conn(|conn| similarities::for_subject(conn, 9))
        .unwrap()
        .is_empty());

    assert_eq!(db.with_conn(similarities::count).unwrap(), 3);
    assert_eq!(db.with_conn(similarities::max_subject).unwrap(), Some(2));
    assert_eq!(db.with_conn(similarities::load_all).unwrap(), entries.to_vec());
}

#[test]
fn clear_from_subject_keeps_earlier_subjects() {
    let db = DatabaseManager::open_in_memory().unwrap();
    db.with_conn(|conn| {
        similarities::insert_many(
            conn,
            &[
                SimilarityEntry::new(1, 2, 0.9),
                SimilarityEntry::new(2, 1, 0.9),
                SimilarityEntry::new(3, 1, 0.1),
            ],
        )
    })
    .unwrap();

    let removed = db
        .with_conn(|conn| similarities::clear_from_subject(conn, 2))
        .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(db.with_conn(similarities::max_subject).unwrap(), Some(1));

    db.with_conn(similarities::clear).unwrap();
    assert_eq!(db.with_conn(similarities::count).unwrap(), 0);
    assert_eq!(db.with_conn(similarities::max_subject).unwrap(), None);
}

#[test]
fn non_positive_scores_are_rejected_by_the_schema() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let entry = SimilarityEntry::new(1, 2, 0.0);
    assert!(db
        .with_conn(|conn| similarities::insert(conn, &entry))
        .is_err());
}

#[test]
fn failed_transaction_rolls_back() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let result = db.with_conn(|conn| {
        with_immediate_transaction(conn, |tx| {
            similarities::insert(tx, &SimilarityEntry::new(1, 2, 0.3))?;
            similarities::insert(tx, &SimilarityEntry::new(1, 3, -1.0))
        })
    });

    assert!(result.is_err());
    assert_eq!(db.with_conn(similarities::count).unwrap(), 0);
}

//! CSV prediction files and import inputs.

use std::io::Write;

use tempfile::TempDir;
use tracksim_core::errors::StorageError;
use tracksim_core::traits::PredictionSink;
use tracksim_core::types::{
    PredictedRating, Prediction, PredictionRequest, PredictionSource, Rating,
};
use tracksim_storage::files::{read_predictions, read_ratings_csv, read_requests_csv};
use tracksim_storage::CsvPredictionWriter;

fn prediction(user_id: i64, item_id: i64, value: f64) -> Prediction {
    Prediction {
        user_id,
        item_id,
        predicted_rating: value,
        source: PredictionSource::ItemBased,
    }
}

#[test]
fn writes_one_headerless_line_per_prediction() {
    let mut writer = CsvPredictionWriter::from_writer(Vec::new());
    writer.emit(&prediction(1, 2, 4.5)).unwrap();
    writer.emit(&Prediction::no_signal(PredictionRequest::new(3, 4))).unwrap();
    writer.flush().unwrap();
    assert_eq!(writer.written(), 2);

    let bytes = writer.into_inner().unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "1,2,4.5\n3,4,0\n");
}

#[test]
fn prediction_file_reads_back_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("predictions.csv");

    let mut writer = CsvPredictionWriter::create(&path).unwrap();
    writer.emit(&prediction(5, 6, 13.0 / 3.0)).unwrap();
    writer.emit(&prediction(1, 9, 2.0)).unwrap();
    writer.flush().unwrap();
    drop(writer);

    let read = read_predictions(&path).unwrap();
    assert_eq!(
        read,
        vec![
            PredictedRating::new(5, 6, 13.0 / 3.0),
            PredictedRating::new(1, 9, 2.0),
        ]
    );
}

#[test]
fn malformed_prediction_file_is_a_file_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("predictions.csv");
    std::fs::write(&path, "1,2,abc\n").unwrap();

    assert!(matches!(
        read_predictions(&path),
        Err(StorageError::FileError { .. })
    ));
    assert!(matches!(
        read_predictions(&dir.path().join("missing.csv")),
        Err(StorageError::FileError { .. })
    ));
}

#[test]
fn import_files_tolerate_whitespace() {
    let dir = TempDir::new().unwrap();
    let training = dir.path().join("train.csv");
    let test = dir.path().join("test.csv");
    let mut f = std::fs::File::create(&training).unwrap();
    writeln!(f, "1, 10, 5").unwrap();
    writeln!(f, "2,10,3").unwrap();
    std::fs::write(&test, "1 ,11\n").unwrap();

    assert_eq!(
        read_ratings_csv(&training).unwrap(),
        vec![Rating::new(1, 10, 5), Rating::new(2, 10, 3)]
    );
    assert_eq!(
        read_requests_csv(&test).unwrap(),
        vec![PredictionRequest::new(1, 11)]
    );
}

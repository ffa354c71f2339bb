//! Tests for the tracksim error types.

use tracksim_core::errors::*;

#[test]
fn every_error_has_a_code() {
    let config = ConfigError::FileNotFound { path: "x".into() };
    assert!(!config.error_code().is_empty());

    let storage = StorageError::sqlite("boom");
    assert!(!storage.error_code().is_empty());

    let file = StorageError::FileError {
        path: "predictions.csv".into(),
        message: "denied".into(),
    };
    assert!(!file.error_code().is_empty());

    let evaluation = EvaluationError::EmptySample;
    assert!(!evaluation.error_code().is_empty());

    let pipeline = PipelineError::Cancelled { processed: 3 };
    assert!(!pipeline.error_code().is_empty());
}

#[test]
fn source_unavailable_keeps_its_code_through_pipeline_error() {
    let storage = StorageError::SourceUnavailable {
        path: "/nope/rating_data.db".into(),
        message: "unable to open database file".into(),
    };
    let pipeline: PipelineError = storage.into();
    assert_eq!(pipeline.error_code(), error_code::SOURCE_UNAVAILABLE);
    assert!(pipeline.diagnostic().starts_with("[SOURCE_UNAVAILABLE]"));
}

#[test]
fn length_mismatch_message_names_both_sizes() {
    let err = EvaluationError::LengthMismatch {
        predicted: 3,
        actual: 4,
    };
    let msg = err.to_string();
    assert!(msg.contains('3') && msg.contains('4'), "{msg}");
    assert_eq!(err.error_code(), error_code::LENGTH_MISMATCH);
}

#[test]
fn cancelled_reports_resume_offset() {
    let err = PipelineError::Cancelled { processed: 750 };
    assert!(err.to_string().contains("resume from offset 750"));
}

#[test]
fn output_failure_has_its_own_code() {
    let err = PipelineError::Output {
        message: "key must be a string".into(),
    };
    assert_eq!(err.error_code(), error_code::OUTPUT_ERROR);
    assert_eq!(
        err.diagnostic(),
        "[OUTPUT_ERROR] Failed to render report: key must be a string"
    );
}

#[test]
fn pair_mismatch_display() {
    let m = PairMismatch {
        position: 2,
        predicted: (1, 10),
        actual: (1, 11),
    };
    assert_eq!(
        m.to_string(),
        "mismatching pair at 2: predicted (1, 10) vs actual (1, 11)"
    );
}

//! `tracksim evaluate`

use std::path::Path;

use serde::Serialize;

use tracksim_core::config::TracksimConfig;
use tracksim_core::errors::PipelineError;
use tracksim_core::traits::RatingSource;
use tracksim_engine::{Evaluator, RatingIndex};
use tracksim_storage::files::read_predictions;

use super::open_existing;

pub fn run(config: &TracksimConfig, json: bool) -> Result<(), PipelineError> {
    let db = open_existing(config)?;
    let by_item = RatingIndex::by_item(&db.training_ratings()?);
    let actual = db.holdout_sample(config.evaluation.effective_holdout_stride())?;
    let predicted = read_predictions(Path::new(config.evaluation.effective_predictions_path()))?;

    let report = Evaluator::new(&by_item).evaluate(&predicted, &actual)?;

    if json {
        println!("{}", render_json(&report)?);
    } else {
        println!("Pairs:                    {}", report.count);
        println!("MAE:                      {:.6}", report.mae);
        println!("RMSE:                     {:.6}", report.rmse);
        println!("Mean diff to item avg:    {:.6}", report.mean_diff_to_item_average);
        for mismatch in &report.mismatches {
            println!("Warning: {mismatch}");
        }
    }
    if !report.is_aligned() {
        tracing::warn!(
            mismatches = report.mismatches.len(),
            "prediction file is not aligned with the held-out sample"
        );
    }
    Ok(())
}

fn render_json<T: Serialize>(value: &T) -> Result<String, PipelineError> {
    serde_json::to_string_pretty(value).map_err(|e| PipelineError::Output {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracksim_core::errors::{error_code, TracksimErrorCode};
    use tracksim_engine::EvaluationReport;

    struct Unrenderable;

    impl Serialize for Unrenderable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("value cannot be rendered"))
        }
    }

    #[test]
    fn report_renders_as_json() {
        let report = EvaluationReport {
            count: 2,
            mae: 0.5,
            rmse: 0.5,
            mean_diff_to_item_average: 1.25,
            mismatches: Vec::new(),
        };
        let text = render_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["mean_diff_to_item_average"], 1.25);
    }

    #[test]
    fn render_failure_is_returned_as_error() {
        let err = render_json(&Unrenderable).unwrap_err();
        assert!(matches!(err, PipelineError::Output { .. }));
        assert_eq!(err.error_code(), error_code::OUTPUT_ERROR);
        assert!(err.to_string().contains("value cannot be rendered"));
    }
}

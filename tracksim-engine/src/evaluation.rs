//! Accuracy of a prediction file against a held-out sample.
//!
//! Predictions and actual ratings are paired by position. Both sides must
//! have the same length; a position whose `(user, item)` identities differ
//! is recorded as a [`PairMismatch`] and left out of the sums, while the
//! divisor stays the full length.

use serde::Serialize;
use tracksim_core::errors::{EvaluationError, PairMismatch};
use tracksim_core::types::{PredictedRating, Rating};

use crate::index::RatingIndex;

/// Error metrics over one held-out sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    /// Number of paired positions.
    pub count: usize,
    /// Mean absolute error.
    pub mae: f64,
    /// Root-mean-square error.
    pub rmse: f64,
    /// Mean absolute distance between each prediction and its item's
    /// average training rating.
    pub mean_diff_to_item_average: f64,
    pub mismatches: Vec<PairMismatch>,
}

impl EvaluationReport {
    /// True when every position paired identical `(user, item)` keys.
    pub fn is_aligned(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Compares predictions with held-out ratings.
pub struct Evaluator<'a> {
    by_item: &'a RatingIndex,
}

impl<'a> Evaluator<'a> {
    /// `by_item` supplies the item averages for
    /// [`EvaluationReport::mean_diff_to_item_average`].
    pub fn new(by_item: &'a RatingIndex) -> Self {
        Self { by_item }
    }

    pub fn evaluate(
        &self,
        predicted: &[PredictedRating],
        actual: &[Rating],
    ) -> Result<EvaluationReport, EvaluationError> {
        let mismatches = pair_mismatches(predicted, actual)?;
        if actual.is_empty() {
            return Err(EvaluationError::EmptySample);
        }
        for mismatch in &mismatches {
            tracing::warn!(
                position = mismatch.position,
                predicted_user = mismatch.predicted.0,
                predicted_item = mismatch.predicted.1,
                actual_user = mismatch.actual.0,
                actual_item = mismatch.actual.1,
                "mismatching pair"
            );
        }

        let n = actual.len() as f64;
        let (mut abs_sum, mut sq_sum) = (0.0f64, 0.0f64);
        for (position, (p, a)) in predicted.iter().zip(actual).enumerate() {
            if is_mismatch(&mismatches, position) {
                continue;
            }
            let diff = p.predicted_rating - f64::from(a.rating);
            abs_sum += diff.abs();
            sq_sum += diff * diff;
        }

        let report = EvaluationReport {
            count: actual.len(),
            mae: abs_sum / n,
            rmse: (sq_sum / n).sqrt(),
            mean_diff_to_item_average: self.mean_diff_to_item_average(predicted),
            mismatches,
        };
        tracing::info!(
            count = report.count,
            mae = report.mae,
            rmse = report.rmse,
            mean_diff_to_item_average = report.mean_diff_to_item_average,
            mismatches = report.mismatches.len(),
            "evaluation complete"
        );
        Ok(report)
    }

    /// Items missing from the training index are skipped but still count in
    /// the divisor. An empty prediction set yields 0.
    pub fn mean_diff_to_item_average(&self, predicted: &[PredictedRating]) -> f64 {
        if predicted.is_empty() {
            return 0.0;
        }
        let total: f64 = predicted
            .iter()
            .filter_map(|p| {
                self.by_item
                    .mean(p.item_id)
                    .map(|mean| (p.predicted_rating - mean).abs())
            })
            .sum();
        total / predicted.len() as f64
    }
}

/// Mean absolute error over positionally paired ratings.
pub fn mean_absolute_error(
    predicted: &[PredictedRating],
    actual: &[Rating],
) -> Result<f64, EvaluationError> {
    let mismatches = pair_mismatches(predicted, actual)?;
    if actual.is_empty() {
        return Err(EvaluationError::EmptySample);
    }
    let sum: f64 = paired(predicted, actual, &mismatches)
        .map(|diff| diff.abs())
        .sum();
    Ok(sum / actual.len() as f64)
}

/// Root-mean-square error over positionally paired ratings.
pub fn root_mean_squared_error(
    predicted: &[PredictedRating],
    actual: &[Rating],
) -> Result<f64, EvaluationError> {
    let mismatches = pair_mismatches(predicted, actual)?;
    if actual.is_empty() {
        return Err(EvaluationError::EmptySample);
    }
    let sum: f64 = paired(predicted, actual, &mismatches)
        .map(|diff| diff * diff)
        .sum();
    Ok((sum / actual.len() as f64).sqrt())
}

/// Positions whose identities disagree. Fails if the lengths differ.
pub fn pair_mismatches(
    predicted: &[PredictedRating],
    actual: &[Rating],
) -> Result<Vec<PairMismatch>, EvaluationError> {
    if predicted.len() != actual.len() {
        return Err(EvaluationError::LengthMismatch {
            predicted: predicted.len(),
            actual: actual.len(),
        });
    }
    Ok(predicted
        .iter()
        .zip(actual)
        .enumerate()
        .filter(|(_, (p, a))| p.user_id != a.user_id || p.item_id != a.item_id)
        .map(|(position, (p, a))| PairMismatch {
            position,
            predicted: (p.user_id, p.item_id),
            actual: (a.user_id, a.item_id),
        })
        .collect())
}

fn paired<'a>(
    predicted: &'a [PredictedRating],
    actual: &'a [Rating],
    mismatches: &'a [PairMismatch],
) -> impl Iterator<Item = f64> + 'a {
    predicted
        .iter()
        .zip(actual)
        .enumerate()
        .filter(move |(position, _)| !is_mismatch(mismatches, *position))
        .map(|(_, (p, a))| p.predicted_rating - f64::from(a.rating))
}

/// `mismatches` is in ascending position order.
fn is_mismatch(mismatches: &[PairMismatch], position: usize) -> bool {
    mismatches
        .binary_search_by_key(&position, |m| m.position)
        .is_ok()
}

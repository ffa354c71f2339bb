//! Two-tier rating predictor.
//!
//! Item-based first: a similarity-weighted average of the user's own ratings
//! of the target's neighbours. When none of the user's items is a neighbour,
//! fall back to a user-based average over positively-correlated raters of
//! the target. With no signal in either tier the prediction is `0.0`.

use serde::Serialize;
use tracksim_core::config::PredictionConfig;
use tracksim_core::constants;
use tracksim_core::errors::StorageError;
use tracksim_core::events::{EventDispatcher, PredictionEmittedEvent};
use tracksim_core::traits::{PredictionSink, SimilarityLookup};
use tracksim_core::types::{Prediction, PredictionRequest, PredictionSource};

use crate::index::RatingIndex;
use crate::scorer::pearson;

/// How often `predict_all` logs progress.
const PROGRESS_EVERY: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictorOptions {
    /// Use the user-based tier when the item-based one has no signal.
    pub user_fallback: bool,
}

impl Default for PredictorOptions {
    fn default() -> Self {
        Self {
            user_fallback: constants::DEFAULT_USER_FALLBACK,
        }
    }
}

impl PredictorOptions {
    pub fn from_config(config: &PredictionConfig) -> Self {
        Self {
            user_fallback: config.effective_user_fallback(),
        }
    }
}

/// Per-tier counts of a prediction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PredictionStats {
    pub emitted: usize,
    pub item_based: usize,
    pub user_based: usize,
    pub no_signal: usize,
}

impl PredictionStats {
    fn record(&mut self, source: PredictionSource) {
        self.emitted += 1;
        match source {
            PredictionSource::ItemBased => self.item_based += 1,
            PredictionSource::UserBased => self.user_based += 1,
            PredictionSource::NoSignal => self.no_signal += 1,
        }
    }
}

/// Predicts ratings from the similarity table and both rating indices.
pub struct RatingPredictor<'a, L: SimilarityLookup + ?Sized> {
    lookup: &'a L,
    by_user: &'a RatingIndex,
    by_item: &'a RatingIndex,
    options: PredictorOptions,
    events: EventDispatcher,
}

impl<'a, L: SimilarityLookup + ?Sized> RatingPredictor<'a, L> {
    pub fn new(
        lookup: &'a L,
        by_user: &'a RatingIndex,
        by_item: &'a RatingIndex,
        options: PredictorOptions,
    ) -> Self {
        Self {
            lookup,
            by_user,
            by_item,
            options,
            events: EventDispatcher::new(),
        }
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    /// Predict one rating. Only a failing similarity lookup is an error.
    pub fn predict(&self, request: PredictionRequest) -> Result<Prediction, StorageError> {
        if let Some(value) = self.item_based(request)? {
            return Ok(self.prediction(request, value, PredictionSource::ItemBased));
        }
        if self.options.user_fallback {
            if let Some(value) = self.user_based(request) {
                return Ok(self.prediction(request, value, PredictionSource::UserBased));
            }
        }
        Ok(Prediction::no_signal(request))
    }

    /// Predict every request in order, flushing the sink after each.
    pub fn predict_all<S: PredictionSink + ?Sized>(
        &self,
        requests: &[PredictionRequest],
        sink: &mut S,
    ) -> Result<PredictionStats, StorageError> {
        let mut stats = PredictionStats::default();
        for &request in requests {
            let prediction = self.predict(request)?;
            sink.emit(&prediction)?;
            sink.flush()?;

            stats.record(prediction.source);
            tracing::trace!(
                user_id = prediction.user_id,
                item_id = prediction.item_id,
                predicted_rating = prediction.predicted_rating,
                prediction_source = prediction.source.name(),
                "prediction emitted"
            );
            self.events.emit_prediction_emitted(&PredictionEmittedEvent {
                user_id: prediction.user_id,
                item_id: prediction.item_id,
                predicted_rating: prediction.predicted_rating,
                source: prediction.source,
            });
            if stats.emitted % PROGRESS_EVERY == 0 {
                tracing::info!(
                    predictions_emitted = stats.emitted,
                    total = requests.len(),
                    "prediction progress"
                );
            }
        }

        tracing::info!(
            predictions_emitted = stats.emitted,
            item_based = stats.item_based,
            user_based = stats.user_based,
            no_signal = stats.no_signal,
            "predictions complete"
        );
        Ok(stats)
    }

    fn item_based(&self, request: PredictionRequest) -> Result<Option<f64>, StorageError> {
        let history = self.by_user.vector(request.user_id);
        if history.is_empty() {
            return Ok(None);
        }
        let neighbours = self.lookup.similarities_for(request.item_id)?;

        let (mut similarity_sum, mut weighted_sum) = (0.0f64, 0.0f64);
        for (item, rating) in history.iter() {
            if item == request.item_id {
                continue;
            }
            if let Some(&score) = neighbours.get(&item) {
                similarity_sum += score;
                weighted_sum += score * f64::from(rating);
            }
        }
        Ok((similarity_sum > 0.0).then(|| weighted_sum / similarity_sum))
    }

    fn user_based(&self, request: PredictionRequest) -> Option<f64> {
        let history = self.by_user.vector(request.user_id);
        if history.is_empty() {
            return None;
        }

        let (mut similarity_sum, mut weighted_sum) = (0.0f64, 0.0f64);
        for (other, rating) in self.by_item.vector(request.item_id).iter() {
            if other == request.user_id {
                continue;
            }
            let score = pearson(history, self.by_user.vector(other));
            if score > 0.0 {
                similarity_sum += score;
                weighted_sum += score * f64::from(rating);
            }
        }
        (similarity_sum > 0.0).then(|| weighted_sum / similarity_sum)
    }

    fn prediction(
        &self,
        request: PredictionRequest,
        predicted_rating: f64,
        source: PredictionSource,
    ) -> Prediction {
        Prediction {
            user_id: request.user_id,
            item_id: request.item_id,
            predicted_rating,
            source,
        }
    }
}

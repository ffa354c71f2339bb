//! Facts and results flowing through the engine.

use serde::{Deserialize, Serialize};

/// User identifier as stored in the rating log.
pub type UserId = i64;

/// Item (track) identifier as stored in the rating log.
pub type ItemId = i64;

/// A single user-item rating from the training log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub rating: i32,
}

impl Rating {
    pub fn new(user_id: UserId, item_id: ItemId, rating: i32) -> Self {
        Self {
            user_id,
            item_id,
            rating,
        }
    }
}

/// A positively-correlated item pair. `score` is always in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityEntry {
    pub subject_id: ItemId,
    pub peer_id: ItemId,
    pub score: f64,
}

impl SimilarityEntry {
    pub fn new(subject_id: ItemId, peer_id: ItemId, score: f64) -> Self {
        Self {
            subject_id,
            peer_id,
            score,
        }
    }
}

/// A `(user, item)` pair whose rating should be predicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub user_id: UserId,
    pub item_id: ItemId,
}

impl PredictionRequest {
    pub fn new(user_id: UserId, item_id: ItemId) -> Self {
        Self { user_id, item_id }
    }
}

/// Which tier of the predictor produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    /// Weighted average over the item's similarity neighbours.
    ItemBased,
    /// Weighted average over positively-correlated users.
    UserBased,
    /// Neither tier had signal; the value is the `0.0` sentinel.
    NoSignal,
}

impl PredictionSource {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ItemBased => "item_based",
            Self::UserBased => "user_based",
            Self::NoSignal => "no_signal",
        }
    }
}

/// A predicted rating for one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub predicted_rating: f64,
    pub source: PredictionSource,
}

impl Prediction {
    /// The "no information" prediction.
    pub fn no_signal(request: PredictionRequest) -> Self {
        Self {
            user_id: request.user_id,
            item_id: request.item_id,
            predicted_rating: 0.0,
            source: PredictionSource::NoSignal,
        }
    }

    pub fn request(&self) -> PredictionRequest {
        PredictionRequest::new(self.user_id, self.item_id)
    }
}

/// A prediction as read back from the prediction file, without its source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictedRating {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub predicted_rating: f64,
}

impl PredictedRating {
    pub fn new(user_id: UserId, item_id: ItemId, predicted_rating: f64) -> Self {
        Self {
            user_id,
            item_id,
            predicted_rating,
        }
    }
}

impl From<Prediction> for PredictedRating {
    fn from(p: Prediction) -> Self {
        Self::new(p.user_id, p.item_id, p.predicted_rating)
    }
}

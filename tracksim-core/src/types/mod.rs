//! Rating data types and collection aliases.

pub mod collections;
pub mod rating;

pub use collections::FxHashMap;
pub use rating::{
    ItemId, PredictedRating, Prediction, PredictionRequest, PredictionSource, Rating,
    SimilarityEntry, UserId,
};

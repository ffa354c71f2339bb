//! Collaborator seams between the engine and the outside world.

pub mod cancellation;
pub mod prediction_sink;
pub mod rating_source;
pub mod similarity_lookup;
pub mod similarity_sink;

pub use cancellation::{Cancellable, CancellationToken};
pub use prediction_sink::PredictionSink;
pub use rating_source::RatingSource;
pub use similarity_lookup::{MemorySimilarityLookup, SimilarityLookup, SimilarityRow};
pub use similarity_sink::{MemorySimilaritySink, SimilaritySink, SinkStats};

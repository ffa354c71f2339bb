//! Batched similarity sink: periodic commits and periodic connection recycling.

pub mod writer;

pub use writer::{BatchWriterConfig, SimilarityBatchWriter};

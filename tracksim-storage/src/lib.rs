//! # tracksim-storage
//!
//! SQLite persistence for the rating log and the similarity table, plus the
//! CSV files predictions are exchanged through.

pub mod batch;
pub mod connection;
pub mod files;
pub mod lookup;
pub mod migrations;
pub mod queries;
pub mod source;

pub use batch::{BatchWriterConfig, SimilarityBatchWriter};
pub use connection::DatabaseManager;
pub use files::CsvPredictionWriter;
pub use lookup::SqliteSimilarityLookup;

//! Headerless CSV files: the prediction sink and the import inputs.

pub mod predictions;
pub mod ratings_csv;

pub use predictions::{read_predictions, CsvPredictionWriter};
pub use ratings_csv::{read_ratings_csv, read_requests_csv};

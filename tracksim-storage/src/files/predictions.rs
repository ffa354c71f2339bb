//! Prediction file: `user_id,item_id,predicted_rating` per line, no header.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracksim_core::errors::StorageError;
use tracksim_core::traits::PredictionSink;
use tracksim_core::types::{ItemId, PredictedRating, Prediction, UserId};

/// Writes predictions as CSV, flushing after every record on request.
pub struct CsvPredictionWriter<W: Write> {
    writer: csv::Writer<W>,
    label: String,
    written: usize,
}

impl CsvPredictionWriter<File> {
    /// Create (truncating) the prediction file at `path`.
    pub fn create(path: &Path) -> Result<Self, StorageError> {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|e| StorageError::FileError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            writer,
            label: path.display().to_string(),
            written: 0,
        })
    }
}

impl<W: Write> CsvPredictionWriter<W> {
    /// Write to an arbitrary sink (e.g. a `Vec<u8>` in tests).
    pub fn from_writer(inner: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().has_headers(false).from_writer(inner),
            label: "<writer>".to_string(),
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W, StorageError> {
        let label = self.label.clone();
        self.writer.into_inner().map_err(|e| StorageError::FileError {
            path: label,
            message: e.to_string(),
        })
    }

    fn file_error(&self, e: impl std::fmt::Display) -> StorageError {
        StorageError::FileError {
            path: self.label.clone(),
            message: e.to_string(),
        }
    }
}

impl<W: Write> PredictionSink for CsvPredictionWriter<W> {
    fn emit(&mut self, prediction: &Prediction) -> Result<(), StorageError> {
        let record = [
            prediction.user_id.to_string(),
            prediction.item_id.to_string(),
            prediction.predicted_rating.to_string(),
        ];
        self.writer
            .write_record(&record)
            .map_err(|e| self.file_error(e))?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        self.writer.flush().map_err(|e| self.file_error(e))
    }
}

/// Read a prediction file back in file order.
pub fn read_predictions(path: &Path) -> Result<Vec<PredictedRating>, StorageError> {
    let file_error = |message: String| StorageError::FileError {
        path: path.display().to_string(),
        message,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| file_error(e.to_string()))?;

    let mut result = Vec::new();
    for record in reader.deserialize::<(UserId, ItemId, f64)>() {
        let (user_id, item_id, predicted_rating) = record.map_err(|e| file_error(e.to_string()))?;
        result.push(PredictedRating::new(user_id, item_id, predicted_rating));
    }
    Ok(result)
}

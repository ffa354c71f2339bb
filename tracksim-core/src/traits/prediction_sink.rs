use crate::errors::StorageError;
use crate::types::Prediction;

/// Append-only destination for predictions.
pub trait PredictionSink {
    fn emit(&mut self, prediction: &Prediction) -> Result<(), StorageError>;

    /// Make everything emitted so far visible to readers.
    fn flush(&mut self) -> Result<(), StorageError>;
}

impl PredictionSink for Vec<Prediction> {
    fn emit(&mut self, prediction: &Prediction) -> Result<(), StorageError> {
        self.push(*prediction);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

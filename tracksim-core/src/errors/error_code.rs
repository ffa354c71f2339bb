//! TracksimErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this so the CLI can print a structured
/// code alongside the message.
pub trait TracksimErrorCode {
    /// Returns the error code string (e.g., "SOURCE_UNAVAILABLE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted diagnostic: `[ERROR_CODE] message`.
    fn diagnostic(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const SOURCE_UNAVAILABLE: &str = "SOURCE_UNAVAILABLE";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const FILE_ERROR: &str = "FILE_ERROR";
pub const LENGTH_MISMATCH: &str = "LENGTH_MISMATCH";
pub const EMPTY_SAMPLE: &str = "EMPTY_SAMPLE";
pub const OUTPUT_ERROR: &str = "OUTPUT_ERROR";
pub const CANCELLED: &str = "CANCELLED";

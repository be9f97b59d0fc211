use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::reading::Reading;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("cannot open {path}: {reason}")]
    Open { path: PathBuf, reason: String },
    #[error("unsupported source format: {0} (expected .csv or .json)")]
    UnsupportedFormat(String),
    #[error("cannot parse source: {0}")]
    Parse(String),
    #[error("row {row}: invalid value for {field}: {value:?}")]
    InvalidRow {
        row: usize,
        field: &'static str,
        value: String,
    },
}

/// Supplier of the reading stream, pulled one reading per tick.
pub trait ReadingSource {
    /// Next reading, or `Ok(None)` once the stream has ended.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the next record exists but cannot be read.
    fn next_reading(&mut self) -> Result<Option<Reading>, SourceError>;

    /// Human-readable description of where readings come from
    fn describe(&self) -> String;
}

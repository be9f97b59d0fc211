//! Reading source over a CSV or JSON file.
//!
//! Both formats carry the columns `timestamp`, `temperature`, `humidity` and
//! `luminosity`. The whole file is loaded on open and replayed one row per
//! call, the way a recorded sensor session is played back.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::entities::reading::Reading;
use crate::domain::ports::source::{ReadingSource, SourceError};
use crate::infrastructure::iso8601;

/// Supported on-disk layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    /// Picks the format from the file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `SourceError::UnsupportedFormat` for anything but `.csv` / `.json`.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(SourceError::UnsupportedFormat(if other.is_empty() {
                path.display().to_string()
            } else {
                format!(".{other}")
            })),
        }
    }
}

/// One row as found in the file, before conversion.
#[derive(Debug, Clone, Default, PartialEq)]
struct RawRecord {
    timestamp: Option<String>,
    temperature: Option<String>,
    humidity: Option<String>,
    luminosity: Option<String>,
}

#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    records: Vec<RawRecord>,
    index: usize,
}

impl FileSource {
    /// Loads every row of a `.csv` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the extension is unsupported, the file cannot
    /// be read, or its structure cannot be parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();
        let records = match SourceFormat::from_path(&path)? {
            SourceFormat::Csv => read_csv(&path)?,
            SourceFormat::Json => read_json(&path)?,
        };
        tracing::debug!("Loaded {} row(s) from {}", records.len(), path.display());
        Ok(Self {
            path,
            records,
            index: 0,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.records.len().saturating_sub(self.index)
    }
}

impl ReadingSource for FileSource {
    fn next_reading(&mut self) -> Result<Option<Reading>, SourceError> {
        let Some(record) = self.records.get(self.index) else {
            return Ok(None);
        };
        self.index += 1;
        to_reading(self.index, record).map(Some)
    }

    fn describe(&self) -> String {
        format!("file: {} ({} rows)", self.path.display(), self.records.len())
    }
}

fn open_error(path: &Path, reason: impl ToString) -> SourceError {
    SourceError::Open {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn read_csv(path: &Path) -> Result<Vec<RawRecord>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| open_error(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| SourceError::Parse(e.to_string()))?
        .clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    };
    let (ts, temp, hum, lux) = (
        column("timestamp"),
        column("temperature"),
        column("humidity"),
        column("luminosity"),
    );

    reader
        .records()
        .map(|record| -> Result<RawRecord, SourceError> {
            let record = record.map_err(|e| SourceError::Parse(e.to_string()))?;
            let field = |idx: Option<usize>| {
                idx.and_then(|i| record.get(i))
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            };
            Ok(RawRecord {
                timestamp: field(ts),
                temperature: field(temp),
                humidity: field(hum),
                luminosity: field(lux),
            })
        })
        .collect()
}

fn read_json(path: &Path) -> Result<Vec<RawRecord>, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|e| open_error(path, e))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| SourceError::Parse(e.to_string()))?;
    let serde_json::Value::Array(rows) = value else {
        return Err(SourceError::Parse(
            "expected a JSON array of reading objects".into(),
        ));
    };

    rows.iter()
        .enumerate()
        .map(|(i, row)| -> Result<RawRecord, SourceError> {
            let object = row.as_object().ok_or_else(|| {
                SourceError::Parse(format!("row {}: expected a JSON object", i + 1))
            })?;
            let field = |name: &str| match object.get(name) {
                None | Some(serde_json::Value::Null) => None,
                Some(serde_json::Value::String(s)) => Some(s.trim().to_string()),
                Some(other) => Some(other.to_string()),
            };
            Ok(RawRecord {
                timestamp: field("timestamp"),
                temperature: field("temperature"),
                humidity: field("humidity"),
                luminosity: field("luminosity"),
            })
        })
        .collect()
}

/// Uses the row's timestamp when it parses, otherwise the current time.
fn resolve_timestamp(row: usize, text: Option<&str>) -> DateTime<Utc> {
    match text.map(iso8601::parse) {
        Some(Ok(ts)) => ts,
        Some(Err(e)) => {
            tracing::debug!("Row {row}: {e}, using current time");
            Utc::now()
        }
        None => Utc::now(),
    }
}

/// Missing values read as `0.0`; present but non-numeric or non-finite
/// values (`NaN`, `inf`) are an error.
fn number(row: usize, field: &'static str, text: Option<&String>) -> Result<f64, SourceError> {
    text.map_or(Ok(0.0), |t| {
        t.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| SourceError::InvalidRow {
                row,
                field,
                value: t.clone(),
            })
    })
}

fn to_reading(row: usize, record: &RawRecord) -> Result<Reading, SourceError> {
    Ok(Reading::new(
        resolve_timestamp(row, record.timestamp.as_deref()),
        number(row, "temperature", record.temperature.as_ref())?,
        number(row, "humidity", record.humidity.as_ref())?,
        number(row, "luminosity", record.luminosity.as_ref())?,
    ))
}

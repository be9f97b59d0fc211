use thiserror::Error;

use crate::domain::entities::alert_event::AlertEvent;
use crate::domain::entities::reading::Reading;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage read failed: {0}")]
    ReadFailed(String),
    #[error("storage write failed: {0}")]
    WriteFailed(String),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Append-only log of raw readings.
pub trait ReadingStore: Send + Sync {
    /// Append a reading. The write is committed before returning.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write operation fails.
    fn append_reading(&self, reading: &Reading) -> Result<(), StoreError>;

    /// Retrieve the last `count` readings in chronological order
    /// (oldest of the selection first).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn recent_readings(&self, count: usize) -> Result<Vec<Reading>, StoreError>;

    /// Retrieve every stored reading in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn all_readings(&self) -> Result<Vec<Reading>, StoreError>;
}

/// Append-only log of non-normal alert events.
pub trait AlertStore: Send + Sync {
    /// Append an alert event. The write is committed before returning.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidRecord` for a `Normal` event, or
    /// `StoreError::WriteFailed` if the write operation fails.
    fn append_alert(&self, event: &AlertEvent) -> Result<(), StoreError>;

    /// Retrieve the last `count` alert events, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn recent_alerts(&self, count: usize) -> Result<Vec<AlertEvent>, StoreError>;
}

/// Rejects events that the alert log must never contain.
///
/// # Errors
///
/// Returns `StoreError::InvalidRecord` if the event is not an alert.
pub fn ensure_alert(event: &AlertEvent) -> Result<(), StoreError> {
    if event.level.is_alert() {
        Ok(())
    } else {
        Err(StoreError::InvalidRecord(format!(
            "alert log only accepts warning or critical events, got {}",
            event.level
        )))
    }
}

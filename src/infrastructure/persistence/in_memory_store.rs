use std::sync::Mutex;

use crate::domain::entities::alert_event::AlertEvent;
use crate::domain::entities::reading::Reading;
use crate::domain::ports::store::{ensure_alert, AlertStore, ReadingStore, StoreError};

/// In-memory store for tests and `--dry-run` sessions.
pub struct InMemoryStore {
    readings: Mutex<Vec<Reading>>,
    alerts: Mutex<Vec<AlertEvent>>,
}

impl InMemoryStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            readings: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        }
    }

    /// Number of readings appended so far
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ReadFailed` if the lock is poisoned.
    pub fn reading_count(&self) -> Result<usize, StoreError> {
        Ok(self
            .readings
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?
            .len())
    }

    /// Number of alert events appended so far
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ReadFailed` if the lock is poisoned.
    pub fn alert_count(&self) -> Result<usize, StoreError> {
        Ok(self
            .alerts
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?
            .len())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingStore for InMemoryStore {
    fn append_reading(&self, reading: &Reading) -> Result<(), StoreError> {
        self.readings
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?
            .push(reading.clone());
        Ok(())
    }

    fn recent_readings(&self, count: usize) -> Result<Vec<Reading>, StoreError> {
        let readings = self
            .readings
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?;
        let start = readings.len().saturating_sub(count);
        Ok(readings[start..].to_vec())
    }

    fn all_readings(&self) -> Result<Vec<Reading>, StoreError> {
        Ok(self
            .readings
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?
            .clone())
    }
}

impl AlertStore for InMemoryStore {
    fn append_alert(&self, event: &AlertEvent) -> Result<(), StoreError> {
        ensure_alert(event)?;
        self.alerts
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?
            .push(event.clone());
        Ok(())
    }

    fn recent_alerts(&self, count: usize) -> Result<Vec<AlertEvent>, StoreError> {
        Ok(self
            .alerts
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?
            .iter()
            .rev()
            .take(count)
            .cloned()
            .collect())
    }
}

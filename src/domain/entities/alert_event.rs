use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reading::Reading;
use crate::domain::value_objects::alert_level::AlertLevel;

/// A persisted non-normal classification.
///
/// Only `Warning` and `Critical` events are ever written; stores reject
/// `Normal`. Events are append-only and never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub timestamp: DateTime<Utc>,
    pub level: AlertLevel,
    pub message: String,
    /// Reading that triggered the alert, if any
    pub reading: Option<Reading>,
}

impl AlertEvent {
    /// Builds an event stamped with the reading's timestamp, or with the
    /// current time when no reading is attached.
    #[must_use]
    pub fn new(level: AlertLevel, message: impl Into<String>, reading: Option<Reading>) -> Self {
        let timestamp = reading.as_ref().map_or_else(Utc::now, |r| r.timestamp);
        Self {
            timestamp,
            level,
            message: message.into(),
            reading,
        }
    }
}

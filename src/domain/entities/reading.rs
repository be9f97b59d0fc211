use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One environmental measurement as delivered by a reading source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    /// Illuminance, lux
    pub luminosity: f64,
}

impl Reading {
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        temperature: f64,
        humidity: f64,
        luminosity: f64,
    ) -> Self {
        Self {
            timestamp,
            temperature,
            humidity,
            luminosity,
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::entities::reading::Reading;

/// Measurement channel carried by every reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Temperature,
    Humidity,
    Luminosity,
}

/// Which side of a threshold is the dangerous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Alert when the value is at or above the threshold
    High,
    /// Alert when the value is at or below the threshold
    Low,
}

impl Direction {
    #[must_use]
    pub fn breaches(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::High => value >= threshold,
            Self::Low => value <= threshold,
        }
    }
}

impl Channel {
    /// Evaluation and display order
    pub const ALL: [Self; 3] = [Self::Temperature, Self::Humidity, Self::Luminosity];

    #[must_use]
    pub const fn value(self, reading: &Reading) -> f64 {
        match self {
            Self::Temperature => reading.temperature,
            Self::Humidity => reading.humidity,
            Self::Luminosity => reading.luminosity,
        }
    }

    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Temperature | Self::Luminosity => Direction::High,
            Self::Humidity => Direction::Low,
        }
    }

    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity => "%",
            Self::Luminosity => "lux",
        }
    }

    /// Decimal places used when rendering values of this channel
    #[must_use]
    pub const fn precision(self) -> usize {
        match self {
            Self::Temperature | Self::Humidity => 1,
            Self::Luminosity => 0,
        }
    }

    /// Formats a value with the channel's precision and unit, e.g. `31.0 °C`
    #[must_use]
    pub fn format_value(self, value: f64) -> String {
        format!("{value:.prec$} {}", self.unit(), prec = self.precision())
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::Humidity => write!(f, "humidity"),
            Self::Luminosity => write!(f, "luminosity"),
        }
    }
}

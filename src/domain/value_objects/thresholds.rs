use serde::{Deserialize, Serialize};

use super::channel::Channel;

/// Two-tier thresholds for every channel.
///
/// Temperature and luminosity alert upwards (value ≥ threshold), humidity
/// alerts downwards (value ≤ threshold). The set is immutable once handed to
/// the engine; adjusting thresholds means building a new set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    /// Temperature (°C) at or above which a warning is raised
    pub temperature_warning: f64,
    /// Temperature (°C) at or above which the reading is critical
    pub temperature_critical: f64,
    /// Relative humidity (%) at or below which a warning is raised
    pub humidity_warning: f64,
    /// Relative humidity (%) at or below which the reading is critical
    pub humidity_critical: f64,
    /// Luminosity (lux) at or above which a warning is raised
    pub luminosity_warning: f64,
    /// Luminosity (lux) at or above which the reading is critical
    pub luminosity_critical: f64,
}

/// Warning/critical pair for one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelThresholds {
    pub warning: f64,
    pub critical: f64,
}

impl ThresholdSet {
    #[must_use]
    pub const fn for_channel(&self, channel: Channel) -> ChannelThresholds {
        match channel {
            Channel::Temperature => ChannelThresholds {
                warning: self.temperature_warning,
                critical: self.temperature_critical,
            },
            Channel::Humidity => ChannelThresholds {
                warning: self.humidity_warning,
                critical: self.humidity_critical,
            },
            Channel::Luminosity => ChannelThresholds {
                warning: self.luminosity_warning,
                critical: self.luminosity_critical,
            },
        }
    }
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            temperature_warning: 30.0,
            temperature_critical: 35.0,
            humidity_warning: 30.0,
            humidity_critical: 20.0,
            luminosity_warning: 800.0,
            luminosity_critical: 1000.0,
        }
    }
}

use serde::{Deserialize, Serialize};

use super::reading::Reading;
use crate::domain::rules::Classification;
use crate::domain::stats::WindowStats;
use crate::domain::value_objects::alert_level::AlertLevel;
use crate::domain::value_objects::channel::Channel;

/// Level reached by each channel on its own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelLevels {
    pub temperature: AlertLevel,
    pub humidity: AlertLevel,
    pub luminosity: AlertLevel,
}

impl ChannelLevels {
    #[must_use]
    pub const fn get(&self, channel: Channel) -> AlertLevel {
        match channel {
            Channel::Temperature => self.temperature,
            Channel::Humidity => self.humidity,
            Channel::Luminosity => self.luminosity,
        }
    }
}

impl From<&Classification> for ChannelLevels {
    fn from(classification: &Classification) -> Self {
        Self {
            temperature: classification.channel_level(Channel::Temperature),
            humidity: classification.channel_level(Channel::Humidity),
            luminosity: classification.channel_level(Channel::Luminosity),
        }
    }
}

/// Result of one engine tick, handed to the presentation layer. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub reading: Reading,
    pub stats: WindowStats,
    pub level: AlertLevel,
    pub channel_levels: ChannelLevels,
    /// One message per triggering channel, in channel order
    pub messages: Vec<String>,
    /// Number of readings in the window after this tick
    pub window_len: usize,
}

impl Snapshot {
    /// Messages joined the way they are persisted in the alert log
    #[must_use]
    pub fn joined_messages(&self) -> String {
        self.messages.join(super::MESSAGE_SEPARATOR)
    }
}

//! Rolling statistics over the sliding window.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::channel::Channel;
use crate::domain::window::SlidingWindow;

/// Mean, minimum and maximum of one channel over the window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Statistics for every channel. `None` means the window held no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    pub temperature: Option<ChannelStats>,
    pub humidity: Option<ChannelStats>,
    pub luminosity: Option<ChannelStats>,
}

impl WindowStats {
    #[must_use]
    pub fn compute(window: &SlidingWindow) -> Self {
        Self {
            temperature: compute(window, Channel::Temperature),
            humidity: compute(window, Channel::Humidity),
            luminosity: compute(window, Channel::Luminosity),
        }
    }

    #[must_use]
    pub const fn get(&self, channel: Channel) -> Option<ChannelStats> {
        match channel {
            Channel::Temperature => self.temperature,
            Channel::Humidity => self.humidity,
            Channel::Luminosity => self.luminosity,
        }
    }
}

/// Computes mean/min/max of `channel` over the window.
///
/// Returns `None` for an empty window.
#[must_use]
pub fn compute(window: &SlidingWindow, channel: Channel) -> Option<ChannelStats> {
    summarize(window.iter().map(|r| channel.value(r)))
}

#[allow(clippy::cast_precision_loss)]
fn summarize(values: impl Iterator<Item = f64>) -> Option<ChannelStats> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for value in values {
        count += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    (count > 0).then(|| ChannelStats {
        mean: sum / count as f64,
        min,
        max,
    })
}

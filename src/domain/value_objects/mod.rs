pub mod alert_level;
pub mod channel;
pub mod thresholds;

pub use alert_level::AlertLevel;
pub use channel::{Channel, Direction};
pub use thresholds::{ChannelThresholds, ThresholdSet};

use crate::domain::entities::reading::Reading;
use crate::domain::value_objects::alert_level::AlertLevel;
use crate::domain::value_objects::channel::{Channel, Direction};
use crate::domain::value_objects::thresholds::ThresholdSet;

use super::{Finding, Rule};

/// Two-tier, direction-aware threshold check for a single channel.
///
/// The critical test is evaluated first; the warning test only when it fails.
pub struct ChannelThresholdRule {
    channel: Channel,
}

impl ChannelThresholdRule {
    #[must_use]
    pub const fn new(channel: Channel) -> Self {
        Self { channel }
    }

    fn describe(&self, level: AlertLevel, value: f64) -> String {
        let side = match self.channel.direction() {
            Direction::High => "High",
            Direction::Low => "Low",
        };
        let tier = if level == AlertLevel::Critical {
            " CRITICAL"
        } else {
            ""
        };
        format!(
            "{side} {}{tier} ({})",
            self.channel,
            self.channel.format_value(value)
        )
    }
}

impl Rule for ChannelThresholdRule {
    fn name(&self) -> &'static str {
        match self.channel {
            Channel::Temperature => "temperature_threshold",
            Channel::Humidity => "humidity_threshold",
            Channel::Luminosity => "luminosity_threshold",
        }
    }

    fn evaluate(&self, reading: &Reading, thresholds: &ThresholdSet) -> Option<Finding> {
        let value = self.channel.value(reading);
        let limits = thresholds.for_channel(self.channel);
        let direction = self.channel.direction();

        let level = if direction.breaches(value, limits.critical) {
            AlertLevel::Critical
        } else if direction.breaches(value, limits.warning) {
            AlertLevel::Warning
        } else {
            return None;
        };

        Some(Finding {
            channel: self.channel,
            level,
            message: self.describe(level, value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn evaluate(channel: Channel, temperature: f64, humidity: f64, luminosity: f64) -> Option<Finding> {
        ChannelThresholdRule::new(channel).evaluate(
            &Reading::new(Utc::now(), temperature, humidity, luminosity),
            &ThresholdSet::default(),
        )
    }

    fn level(finding: Option<Finding>) -> AlertLevel {
        finding.map_or(AlertLevel::Normal, |f| f.level)
    }

    #[test]
    fn temperature_below_warning_is_silent() {
        assert!(evaluate(Channel::Temperature, 29.9, 50.0, 300.0).is_none());
    }

    #[test]
    fn temperature_at_warning_threshold() {
        let finding = evaluate(Channel::Temperature, 30.0, 50.0, 300.0);
        assert_eq!(level(finding.clone()), AlertLevel::Warning);
        assert_eq!(
            finding.map(|f| f.message).as_deref(),
            Some("High temperature (30.0 °C)")
        );
    }

    #[test]
    fn temperature_at_critical_threshold() {
        let finding = evaluate(Channel::Temperature, 35.0, 50.0, 300.0);
        assert_eq!(level(finding.clone()), AlertLevel::Critical);
        assert_eq!(
            finding.map(|f| f.message).as_deref(),
            Some("High temperature CRITICAL (35.0 °C)")
        );
    }

    #[test]
    fn humidity_direction_is_low() {
        assert!(evaluate(Channel::Humidity, 22.0, 30.1, 300.0).is_none());
        assert_eq!(level(evaluate(Channel::Humidity, 22.0, 30.0, 300.0)), AlertLevel::Warning);
        assert_eq!(level(evaluate(Channel::Humidity, 22.0, 25.0, 300.0)), AlertLevel::Warning);
        assert_eq!(level(evaluate(Channel::Humidity, 22.0, 20.0, 300.0)), AlertLevel::Critical);
        assert_eq!(level(evaluate(Channel::Humidity, 22.0, 5.0, 300.0)), AlertLevel::Critical);
    }

    #[test]
    fn humidity_message_format() {
        let finding = evaluate(Channel::Humidity, 22.0, 18.04, 300.0);
        assert_eq!(
            finding.map(|f| f.message).as_deref(),
            Some("Low humidity CRITICAL (18.0 %)")
        );
    }

    #[test]
    fn luminosity_tiers_and_format() {
        assert!(evaluate(Channel::Luminosity, 22.0, 50.0, 799.9).is_none());
        let warning = evaluate(Channel::Luminosity, 22.0, 50.0, 850.4);
        assert_eq!(
            warning.map(|f| f.message).as_deref(),
            Some("High luminosity (850 lux)")
        );
        let critical = evaluate(Channel::Luminosity, 22.0, 50.0, 1000.0);
        assert_eq!(level(critical.clone()), AlertLevel::Critical);
        assert_eq!(
            critical.map(|f| f.message).as_deref(),
            Some("High luminosity CRITICAL (1000 lux)")
        );
    }

    #[test]
    fn rule_only_looks_at_its_channel() {
        assert!(evaluate(Channel::Temperature, 22.0, 5.0, 5000.0).is_none());
    }

    #[test]
    fn nan_never_triggers() {
        assert!(evaluate(Channel::Temperature, f64::NAN, 50.0, 300.0).is_none());
    }
}

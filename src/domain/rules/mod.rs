pub mod threshold;

use crate::domain::entities::reading::Reading;
use crate::domain::value_objects::alert_level::AlertLevel;
use crate::domain::value_objects::channel::Channel;
use crate::domain::value_objects::thresholds::ThresholdSet;

pub use threshold::ChannelThresholdRule;

/// Outcome of one rule firing on one reading
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub channel: Channel,
    pub level: AlertLevel,
    pub message: String,
}

/// A deterministic rule that evaluates a single reading.
/// Rules are pure functions: reading + thresholds in, at most one finding out. No I/O.
pub trait Rule: Send + Sync {
    /// Returns the unique name of this rule
    fn name(&self) -> &'static str;

    /// Evaluates the rule against a reading using the given thresholds
    fn evaluate(&self, reading: &Reading, thresholds: &ThresholdSet) -> Option<Finding>;
}

/// Returns one threshold rule per channel, in message order
#[must_use]
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    Channel::ALL
        .into_iter()
        .map(|channel| Box::new(ChannelThresholdRule::new(channel)) as Box<dyn Rule>)
        .collect()
}

/// Combined verdict for one reading
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    pub level: AlertLevel,
    pub findings: Vec<Finding>,
}

impl Classification {
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.findings.iter().map(|f| f.message.clone()).collect()
    }

    /// Level reached by a single channel, `Normal` if it did not trigger
    #[must_use]
    pub fn channel_level(&self, channel: Channel) -> AlertLevel {
        self.findings
            .iter()
            .find(|f| f.channel == channel)
            .map_or(AlertLevel::Normal, |f| f.level)
    }
}

/// Stateless classifier: runs every rule against a reading and keeps the
/// worst level. Findings keep rule registration order; each reading is judged
/// on its own, with no memory of earlier readings.
pub struct Classifier {
    rules: Vec<Box<dyn Rule>>,
}

impl Classifier {
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn classify(&self, reading: &Reading, thresholds: &ThresholdSet) -> Classification {
        let findings: Vec<Finding> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(reading, thresholds))
            .collect();
        let level = findings
            .iter()
            .map(|f| f.level)
            .max()
            .unwrap_or(AlertLevel::Normal);
        Classification { level, findings }
    }

    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

/// Classifies a reading with the default per-channel rules.
#[must_use]
pub fn classify(reading: &Reading, thresholds: &ThresholdSet) -> (AlertLevel, Vec<String>) {
    let classification = Classifier::default().classify(reading, thresholds);
    let messages = classification.messages();
    (classification.level, messages)
}

#![allow(clippy::expect_used)]

use chrono::Utc;
use envwatch::domain::entities::Reading;
use envwatch::domain::rules::{classify, default_rules, Classifier, Finding, Rule};
use envwatch::domain::value_objects::{AlertLevel, Channel, ThresholdSet};

fn reading(temperature: f64, humidity: f64, luminosity: f64) -> Reading {
    Reading::new(Utc::now(), temperature, humidity, luminosity)
}

fn level_of(temperature: f64, humidity: f64, luminosity: f64) -> AlertLevel {
    classify(&reading(temperature, humidity, luminosity), &ThresholdSet::default()).0
}

// ---------------------------------------------------------------------------
// Boundaries
// ---------------------------------------------------------------------------

#[test]
fn thresholds_are_inclusive() {
    assert_eq!(level_of(35.0, 50.0, 300.0), AlertLevel::Critical);
    assert_eq!(level_of(30.0, 50.0, 300.0), AlertLevel::Warning);
    assert_eq!(level_of(29.9, 50.0, 300.0), AlertLevel::Normal);

    assert_eq!(level_of(22.0, 30.0, 300.0), AlertLevel::Warning);
    assert_eq!(level_of(22.0, 20.0, 300.0), AlertLevel::Critical);
    assert_eq!(level_of(22.0, 30.1, 300.0), AlertLevel::Normal);

    assert_eq!(level_of(22.0, 50.0, 800.0), AlertLevel::Warning);
    assert_eq!(level_of(22.0, 50.0, 1000.0), AlertLevel::Critical);
    assert_eq!(level_of(22.0, 50.0, 799.0), AlertLevel::Normal);
}

#[test]
fn mid_range_humidity_is_warning() {
    let (level, messages) = classify(&reading(22.0, 25.0, 300.0), &ThresholdSet::default());
    assert_eq!(level, AlertLevel::Warning);
    assert_eq!(messages, vec!["Low humidity (25.0 %)".to_string()]);
}

#[test]
fn normal_reading_has_no_messages() {
    let (level, messages) = classify(&reading(22.0, 50.0, 300.0), &ThresholdSet::default());
    assert_eq!(level, AlertLevel::Normal);
    assert!(messages.is_empty());
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[test]
fn every_channel_reports_in_order() {
    let (level, messages) = classify(&reading(36.0, 18.0, 1200.0), &ThresholdSet::default());
    assert_eq!(level, AlertLevel::Critical);
    assert_eq!(
        messages,
        vec![
            "High temperature CRITICAL (36.0 °C)".to_string(),
            "Low humidity CRITICAL (18.0 %)".to_string(),
            "High luminosity CRITICAL (1200 lux)".to_string(),
        ]
    );
}

#[test]
fn overall_level_is_the_worst_channel() {
    let (level, messages) = classify(&reading(31.0, 50.0, 1000.0), &ThresholdSet::default());
    assert_eq!(level, AlertLevel::Critical);
    assert_eq!(
        messages,
        vec![
            "High temperature (31.0 °C)".to_string(),
            "High luminosity CRITICAL (1000 lux)".to_string(),
        ]
    );
}

#[test]
fn classification_is_deterministic() {
    let r = reading(33.3, 22.2, 950.0);
    let thresholds = ThresholdSet::default();
    let first = classify(&r, &thresholds);
    for _ in 0..10 {
        assert_eq!(classify(&r, &thresholds), first);
    }
}

#[test]
fn custom_thresholds_change_the_verdict() {
    let thresholds = ThresholdSet {
        temperature_warning: 25.0,
        temperature_critical: 28.0,
        ..ThresholdSet::default()
    };
    let (level, messages) = classify(&reading(26.0, 50.0, 300.0), &thresholds);
    assert_eq!(level, AlertLevel::Warning);
    assert_eq!(messages, vec!["High temperature (26.0 °C)".to_string()]);
}

// ---------------------------------------------------------------------------
// Rule registry
// ---------------------------------------------------------------------------

struct FrostRule;

impl Rule for FrostRule {
    fn name(&self) -> &'static str {
        "frost"
    }

    fn evaluate(&self, reading: &Reading, _thresholds: &ThresholdSet) -> Option<Finding> {
        (reading.temperature <= 0.0).then(|| Finding {
            channel: Channel::Temperature,
            level: AlertLevel::Warning,
            message: "Frost risk".into(),
        })
    }
}

#[test]
fn default_rules_cover_every_channel() {
    let classifier = Classifier::new(default_rules());
    assert_eq!(
        classifier.rule_names(),
        vec![
            "temperature_threshold",
            "humidity_threshold",
            "luminosity_threshold"
        ]
    );
}

#[test]
fn extra_rules_append_after_defaults() {
    let mut rules = default_rules();
    rules.push(Box::new(FrostRule));
    let classifier = Classifier::new(rules);

    let classification = classifier.classify(&reading(-2.0, 15.0, 300.0), &ThresholdSet::default());

    assert_eq!(classification.level, AlertLevel::Critical);
    assert_eq!(
        classification.messages(),
        vec!["Low humidity CRITICAL (15.0 %)".to_string(), "Frost risk".to_string()]
    );
    assert_eq!(
        classification.channel_level(Channel::Humidity),
        AlertLevel::Critical
    );
    assert_eq!(
        classification.channel_level(Channel::Luminosity),
        AlertLevel::Normal
    );
}

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use chrono::{TimeDelta, TimeZone, Utc};
use envwatch::application::config::AppConfig;
use envwatch::application::services::engine::{Engine, EngineConfig, EngineState, TickOutcome};
use envwatch::domain::entities::Reading;
use envwatch::domain::ports::{AlertStore, ReadingStore};
use envwatch::domain::value_objects::AlertLevel;
use envwatch::infrastructure::persistence::sqlite_store::SqliteStore;
use envwatch::infrastructure::sources::{FileSource, MemorySource};
use envwatch::presentation::cli::commands::export::run_export;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn reading_at(offset_secs: i64, temperature: f64) -> Reading {
    let base = Utc
        .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    Reading::new(base + TimeDelta::seconds(offset_secs), temperature, 50.0, 300.0)
}

fn drain(engine: &mut Engine<'_>, source: &mut FileSource) -> Vec<AlertLevel> {
    let mut levels = Vec::new();
    while let TickOutcome::Processed(snapshot) = engine.step(source).expect("step") {
        levels.push(snapshot.level);
    }
    levels
}

#[test]
fn csv_fixture_through_sqlite_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("envwatch.db");
    let store = SqliteStore::new(db.to_str().expect("utf8 path")).expect("open store");
    let mut engine = Engine::new(EngineConfig::default(), &store, &store);
    let mut source = FileSource::open(fixture("readings.csv")).expect("open fixture");

    let levels = drain(&mut engine, &mut source);

    assert_eq!(
        levels,
        vec![
            AlertLevel::Normal,
            AlertLevel::Warning,
            AlertLevel::Critical,
            AlertLevel::Warning,
            AlertLevel::Critical,
            AlertLevel::Warning,
            AlertLevel::Normal,
        ]
    );
    assert_eq!(engine.state(), EngineState::Stopped);
    assert_eq!(store.all_readings().expect("readings").len(), 7);

    let alerts = store.recent_alerts(10).expect("alerts");
    assert_eq!(alerts.len(), 5);
    assert_eq!(alerts[0].message, "High luminosity (850 lux)");
    assert_eq!(
        alerts[1].message,
        "Low humidity CRITICAL (18.0 %) | High luminosity CRITICAL (1200 lux)"
    );
    assert_eq!(alerts[4].message, "High temperature (30.0 °C)");
    assert!(alerts.iter().all(|a| a.reading.is_some()));
}

#[test]
fn history_survives_reopening_the_database() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("nested").join("envwatch.db");
    let db = db.to_str().expect("utf8 path");

    {
        let store = SqliteStore::new(db).expect("open store");
        let mut engine = Engine::new(EngineConfig::default(), &store, &store);
        engine.tick(reading_at(0, 22.0)).expect("tick");
        engine.tick(reading_at(1, 36.0)).expect("tick");
    }

    let store = SqliteStore::new(db).expect("reopen store");
    let readings = store.recent_readings(10).expect("readings");
    assert_eq!(readings, vec![reading_at(0, 22.0), reading_at(1, 36.0)]);

    let alerts = store.recent_alerts(10).expect("alerts");
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].level, AlertLevel::Critical);
    assert_eq!(alerts[0].timestamp, reading_at(1, 36.0).timestamp);
    assert_eq!(alerts[0].reading, Some(reading_at(1, 36.0)));
}

#[test]
fn window_evicts_oldest_readings() {
    let store = SqliteStore::in_memory().expect("store");
    let config = EngineConfig {
        window_capacity: 3,
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(config, &store, &store);
    let readings: Vec<Reading> = (0..4u8)
        .map(|i| reading_at(i64::from(i), 20.0 + f64::from(i)))
        .collect();
    let mut source: MemorySource = readings.iter().cloned().collect();

    while let TickOutcome::Processed(_) = engine.step(&mut source).expect("step") {}

    assert_eq!(engine.window().snapshot(), readings[1..].to_vec());
    assert_eq!(store.all_readings().expect("readings"), readings);
}

#[test]
fn stats_are_stable_without_new_readings() {
    let store = SqliteStore::in_memory().expect("store");
    let mut engine = Engine::new(EngineConfig::default(), &store, &store);
    let snapshot = engine.tick(reading_at(0, 24.0)).expect("tick");

    assert_eq!(engine.stats(), snapshot.stats);
    assert_eq!(engine.stats(), engine.stats());
}

#[test]
fn engine_config_comes_from_app_config() {
    let mut config = AppConfig::default();
    config.thresholds.temperature_warning = 25.0;
    config.window.capacity = 2;
    let store = SqliteStore::in_memory().expect("store");
    let mut engine = Engine::new(EngineConfig::from(&config), &store, &store);

    let snapshot = engine.tick(reading_at(0, 26.0)).expect("tick");

    assert_eq!(snapshot.level, AlertLevel::Warning);
    assert_eq!(engine.window().capacity(), 2);
}

#[test]
fn export_writes_full_history() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SqliteStore::in_memory().expect("store");
    let mut engine = Engine::new(EngineConfig::default(), &store, &store);
    for i in 0..5 {
        engine.tick(reading_at(i, 21.0)).expect("tick");
    }
    let output = dir.path().join("history.csv");

    let rows = run_export(&store, &output).expect("export");

    assert_eq!(rows, 5);
    let text = std::fs::read_to_string(&output).expect("read export");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("timestamp,temperature,humidity,luminosity"));
    assert_eq!(lines.next(), Some("2024-06-01T12:00:00+00:00,21,50,300"));
    assert_eq!(lines.count(), 4);
}

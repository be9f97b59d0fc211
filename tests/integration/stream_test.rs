#![allow(clippy::expect_used)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use envwatch::application::services::engine::{Engine, EngineConfig, EngineError};
use envwatch::application::services::runner::{RunEnd, StreamRunner, TickControl};
use envwatch::domain::ports::{AlertStore, ReadingStore, SourceError};
use envwatch::domain::value_objects::AlertLevel;
use envwatch::infrastructure::persistence::in_memory_store::InMemoryStore;
use envwatch::infrastructure::sources::FileSource;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[tokio::test(start_paused = true)]
async fn csv_stream_runs_to_completion() {
    let store = InMemoryStore::new();
    let engine = Engine::new(EngineConfig::default(), &store, &store);
    let source = FileSource::open(fixture("readings.csv")).expect("open fixture");
    let mut runner = StreamRunner::new(engine, source, Duration::from_millis(500));
    let mut window_lens = Vec::new();

    let summary = runner
        .run(std::future::pending(), |snapshot| {
            window_lens.push(snapshot.window_len);
            TickControl::Continue
        })
        .await
        .expect("run");

    assert_eq!(summary.ticks, 7);
    assert_eq!(summary.alerts, 5);
    assert_eq!(summary.ended, RunEnd::StreamEnded);
    assert_eq!(window_lens, vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(store.reading_count().expect("count"), 7);
    assert_eq!(store.alert_count().expect("count"), 5);
}

#[tokio::test(start_paused = true)]
async fn json_stream_fills_missing_timestamp() {
    let store = InMemoryStore::new();
    let engine = Engine::new(EngineConfig::default(), &store, &store);
    let source = FileSource::open(fixture("readings.json")).expect("open fixture");
    let mut runner = StreamRunner::new(engine, source, Duration::from_millis(200));
    let mut levels = Vec::new();

    let summary = runner
        .run(std::future::pending(), |snapshot| {
            levels.push(snapshot.level);
            TickControl::Continue
        })
        .await
        .expect("run");

    assert_eq!(summary.ticks, 3);
    assert_eq!(
        levels,
        vec![AlertLevel::Normal, AlertLevel::Critical, AlertLevel::Warning]
    );

    let readings = store.all_readings().expect("readings");
    assert!((readings[1].temperature - 36.2).abs() < f64::EPSILON);
    assert!(readings[2].timestamp > readings[1].timestamp);

    let alerts = store.recent_alerts(1).expect("alerts");
    assert_eq!(alerts[0].message, "High luminosity (900 lux)");
}

#[tokio::test(start_paused = true)]
async fn invalid_row_halts_the_stream() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.csv");
    let mut file = std::fs::File::create(&path).expect("create");
    file.write_all(b"timestamp,temperature,humidity,luminosity\n2024-06-01T08:00:00Z,22,50,300\n2024-06-01T08:00:01Z,hot,50,300\n2024-06-01T08:00:02Z,22,50,300\n")
        .expect("write");

    let store = InMemoryStore::new();
    let engine = Engine::new(EngineConfig::default(), &store, &store);
    let source = FileSource::open(&path).expect("open");
    let mut runner = StreamRunner::new(engine, source, Duration::from_millis(200));

    let err = runner
        .run(std::future::pending(), |_| TickControl::Continue)
        .await
        .expect_err("second row is not numeric");

    match err {
        EngineError::Source(SourceError::InvalidRow { row, field, value }) => {
            assert_eq!(row, 2);
            assert_eq!(field, "temperature");
            assert_eq!(value, "hot");
        }
        other => panic!("expected InvalidRow, got {other:?}"),
    }
    assert_eq!(store.reading_count().expect("count"), 1);
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_between_ticks() {
    let store = InMemoryStore::new();
    let engine = Engine::new(EngineConfig::default(), &store, &store);
    let source = FileSource::open(fixture("readings.csv")).expect("open fixture");
    let mut runner = StreamRunner::new(engine, source, Duration::from_millis(1000));

    let summary = runner
        .run(tokio::time::sleep(Duration::from_millis(3500)), |_| {
            TickControl::Continue
        })
        .await
        .expect("run");

    assert_eq!(summary.ended, RunEnd::Interrupted);
    assert_eq!(summary.ticks, 3);
    assert_eq!(runner.source().remaining(), 4);
}

use std::path::PathBuf;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::domain::entities::alert_event::AlertEvent;
use crate::domain::entities::reading::Reading;
use crate::domain::ports::store::{ensure_alert, AlertStore, ReadingStore, StoreError};
use crate::domain::value_objects::alert_level::AlertLevel;
use crate::infrastructure::iso8601;

use super::migrations;

/// SQLite-backed append-only log of readings and alert events.
///
/// Every write runs in autocommit mode, so it is durable once the call returns.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new `SQLite` store at the given path.
    ///
    /// Expands `~`, creates parent directories, opens connection,
    /// sets WAL mode and pragmas, and initializes schema.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` if the database cannot be opened or initialized.
    pub fn new(path: &str) -> Result<Self, StoreError> {
        let expanded = shellexpand::tilde(path);
        let db_path = PathBuf::from(expanded.as_ref());

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        }

        let conn =
            Connection::open(&db_path).map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        conn.pragma_update(None, "synchronous", "FULL")
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        conn.pragma_update(None, "busy_timeout", 5000)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        Self::from_connection(conn)
    }

    /// Open a private in-memory database, mainly for tests and dry runs.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` if the schema cannot be created.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        migrations::initialize_schema(&conn).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn query_readings(&self, sql: &str, limit: Option<i64>) -> Result<Vec<Reading>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?;

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        let rows = match limit {
            Some(limit) => stmt.query_map(params![limit], parse_reading_row),
            None => stmt.query_map([], parse_reading_row),
        };
        let readings = rows
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        drop(stmt);
        drop(conn);
        Ok(readings)
    }
}

fn conversion_error(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_reading_row(row: &rusqlite::Row<'_>) -> Result<Reading, rusqlite::Error> {
    let timestamp: String = row.get(0)?;
    let timestamp = iso8601::parse(&timestamp).map_err(|e| conversion_error(0, e))?;
    Ok(Reading {
        timestamp,
        temperature: row.get(1)?,
        humidity: row.get(2)?,
        luminosity: row.get(3)?,
    })
}

fn parse_alert_row(row: &rusqlite::Row<'_>) -> Result<AlertEvent, rusqlite::Error> {
    let timestamp: String = row.get(0)?;
    let level: String = row.get(1)?;
    let message: String = row.get(2)?;
    let temperature: Option<f64> = row.get(3)?;
    let humidity: Option<f64> = row.get(4)?;
    let luminosity: Option<f64> = row.get(5)?;

    let timestamp = iso8601::parse(&timestamp).map_err(|e| conversion_error(0, e))?;
    let level: AlertLevel = level.parse().map_err(|e| conversion_error(1, e))?;

    let reading = match (temperature, humidity, luminosity) {
        (Some(t), Some(h), Some(l)) => Some(Reading::new(timestamp, t, h, l)),
        _ => None,
    };

    Ok(AlertEvent {
        timestamp,
        level,
        message,
        reading,
    })
}

impl ReadingStore for SqliteStore {
    fn append_reading(&self, reading: &Reading) -> Result<(), StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?;

        conn.execute(
            "INSERT INTO sensor_data (timestamp, temperature, humidity, luminosity) \
             VALUES (?1, ?2, ?3, ?4)",
            params![
                iso8601::format(&reading.timestamp),
                reading.temperature,
                reading.humidity,
                reading.luminosity,
            ],
        )
        .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        drop(conn);
        Ok(())
    }

    fn recent_readings(&self, count: usize) -> Result<Vec<Reading>, StoreError> {
        let limit = i64::try_from(count).map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        let mut readings = self.query_readings(
            "SELECT timestamp, temperature, humidity, luminosity \
             FROM sensor_data ORDER BY id DESC LIMIT ?1",
            Some(limit),
        )?;
        readings.reverse();
        Ok(readings)
    }

    fn all_readings(&self) -> Result<Vec<Reading>, StoreError> {
        self.query_readings(
            "SELECT timestamp, temperature, humidity, luminosity \
             FROM sensor_data ORDER BY id ASC",
            None,
        )
    }
}

impl AlertStore for SqliteStore {
    fn append_alert(&self, event: &AlertEvent) -> Result<(), StoreError> {
        ensure_alert(event)?;

        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?;

        conn.execute(
            "INSERT INTO alerts (timestamp, level, message, temperature, humidity, luminosity) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                iso8601::format(&event.timestamp),
                event.level.as_str(),
                event.message,
                event.reading.as_ref().map(|r| r.temperature),
                event.reading.as_ref().map(|r| r.humidity),
                event.reading.as_ref().map(|r| r.luminosity),
            ],
        )
        .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        drop(conn);
        Ok(())
    }

    fn recent_alerts(&self, count: usize) -> Result<Vec<AlertEvent>, StoreError> {
        let limit = i64::try_from(count).map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?;

        let mut stmt = conn
            .prepare(
                "SELECT timestamp, level, message, temperature, humidity, luminosity \
                 FROM alerts ORDER BY id DESC LIMIT ?1",
            )
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        let alerts = stmt
            .query_map(params![limit], parse_alert_row)
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        drop(stmt);
        drop(conn);
        Ok(alerts)
    }
}

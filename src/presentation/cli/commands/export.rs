use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::domain::entities::reading::Reading;
use crate::domain::ports::store::ReadingStore;
use crate::infrastructure::iso8601;

const HEADER: [&str; 4] = ["timestamp", "temperature", "humidity", "luminosity"];

/// Write readings as CSV (header row, RFC 3339 timestamps). Returns the row count.
///
/// # Errors
///
/// Returns an error if a row cannot be written.
pub fn write_csv<W: Write>(readings: &[Reading], writer: W) -> anyhow::Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER)?;
    for r in readings {
        csv.write_record([
            iso8601::format(&r.timestamp),
            r.temperature.to_string(),
            r.humidity.to_string(),
            r.luminosity.to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(readings.len())
}

/// Export the full reading history, oldest first, to `path`.
///
/// # Errors
///
/// Returns an error if the store query fails or the file cannot be written.
pub fn run_export(store: &dyn ReadingStore, path: &Path) -> anyhow::Result<usize> {
    let readings = store
        .all_readings()
        .map_err(|e| anyhow::anyhow!("failed to read readings: {e}"))?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let rows = write_csv(&readings, file)?;
    tracing::info!("Exported {rows} reading(s) to {}", path.display());
    println!("Exported {rows} reading(s) to {}", path.display());
    Ok(rows)
}

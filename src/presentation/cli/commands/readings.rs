use crate::domain::ports::store::ReadingStore;
use crate::presentation::cli::formatters::snapshot_fmt::print_section_header;
use crate::presentation::cli::formatters::table_fmt::format_reading_table;

/// Print the last `count` persisted readings, oldest first.
///
/// # Errors
///
/// Returns an error if the store query fails or JSON serialization fails.
pub fn run_readings(store: &dyn ReadingStore, count: usize, json: bool) -> anyhow::Result<()> {
    let readings = store
        .recent_readings(count)
        .map_err(|e| anyhow::anyhow!("failed to read readings: {e}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&readings)?);
        return Ok(());
    }

    print_section_header(&format!("🌡  Last {} reading(s)", readings.len()));
    println!("{}", format_reading_table(&readings));
    Ok(())
}

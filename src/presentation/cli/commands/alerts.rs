use crate::domain::ports::store::AlertStore;
use crate::presentation::cli::formatters::alert_fmt::{format_alerts, no_alerts};
use crate::presentation::cli::formatters::snapshot_fmt::print_section_header;

/// Print the last `count` alert events, newest first.
///
/// # Errors
///
/// Returns an error if the store query fails or JSON serialization fails.
pub fn run_alerts(store: &dyn AlertStore, count: usize, json: bool) -> anyhow::Result<()> {
    let alerts = store
        .recent_alerts(count)
        .map_err(|e| anyhow::anyhow!("failed to read alerts: {e}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&alerts)?);
        return Ok(());
    }

    if alerts.is_empty() {
        println!("{}", no_alerts());
        return Ok(());
    }

    print_section_header(&format!("🚨 Last {} alert(s)", alerts.len()));
    println!("{}", format_alerts(&alerts));
    Ok(())
}

use crate::domain::entities::reading::Reading;

/// Formats readings as an aligned table, in the order given.
///
/// # Returns
///
/// A multi-line string with header, separator, and one row per reading.
#[must_use]
pub fn format_reading_table(readings: &[Reading]) -> String {
    let header = format!(
        "{:<20} {:>10} {:>10} {:>10}",
        "TIMESTAMP", "TEMP(°C)", "HUM(%)", "LUX"
    );
    let separator = "─".repeat(header.chars().count());

    let mut rows = vec![header, separator];
    for r in readings {
        rows.push(format!(
            "{:<20} {:>10.1} {:>10.1} {:>10.0}",
            r.timestamp.format("%Y-%m-%d %H:%M:%S"),
            r.temperature,
            r.humidity,
            r.luminosity
        ));
    }

    rows.join("\n")
}

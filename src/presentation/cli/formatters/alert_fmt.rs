use colored::Colorize;

use crate::domain::entities::alert_event::AlertEvent;
use crate::domain::value_objects::alert_level::AlertLevel;

/// Strips ANSI escape sequences from a string to prevent terminal injection.
///
/// CSI sequences (`ESC [` up to a final byte in `@..=~`) and OSC sequences
/// (`ESC ]` up to BEL or `ESC \\`) are removed whole; any other `ESC`
/// takes the following character with it.
#[must_use]
pub fn sanitize_terminal(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('[') => {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    out
}

#[must_use]
pub fn level_badge(level: AlertLevel) -> String {
    let label = format!(" {:<8} ", level.as_str().to_uppercase());
    match level {
        AlertLevel::Critical => format!("{}", label.on_red().white().bold()),
        AlertLevel::Warning => format!("{}", label.on_yellow().black().bold()),
        AlertLevel::Normal => format!("{}", label.on_green().black()),
    }
}

/// Renders alert events, one block per event, in the order given.
#[must_use]
pub fn format_alerts(alerts: &[AlertEvent]) -> String {
    let mut lines = Vec::with_capacity(alerts.len() * 2);
    for alert in alerts {
        lines.push(format!(
            "{} {} {}",
            level_badge(alert.level),
            alert.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            sanitize_terminal(&alert.message).bold()
        ));
        if let Some(reading) = &alert.reading {
            lines.push(format!(
                "  {}",
                format!(
                    "T {:.1} °C  H {:.1} %  L {:.0} lux",
                    reading.temperature, reading.humidity, reading.luminosity
                )
                .dimmed()
            ));
        }
    }
    lines.join("\n")
}

#[must_use]
pub fn no_alerts() -> String {
    format!("{}", "✅ No alerts recorded".green().bold())
}

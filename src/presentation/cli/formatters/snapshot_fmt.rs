use colored::{ColoredString, Colorize};

use super::alert_fmt::{level_badge, sanitize_terminal};
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::value_objects::alert_level::AlertLevel;
use crate::domain::value_objects::channel::Channel;

/// Colours a formatted channel value by the level it reached.
#[must_use]
pub fn colorize_value(text: String, level: AlertLevel) -> ColoredString {
    match level {
        AlertLevel::Critical => text.red().bold(),
        AlertLevel::Warning => text.yellow(),
        AlertLevel::Normal => text.green(),
    }
}

fn channel_label(channel: Channel) -> &'static str {
    match channel {
        Channel::Temperature => "T",
        Channel::Humidity => "H",
        Channel::Luminosity => "L",
    }
}

/// Formatted value of one channel and the level the engine assigned it.
fn channel_cell(snapshot: &Snapshot, channel: Channel) -> (String, AlertLevel) {
    (
        channel.format_value(channel.value(&snapshot.reading)),
        snapshot.channel_levels.get(channel),
    )
}

/// One status line per tick: badge, current values, rolling means, messages.
#[must_use]
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let values: Vec<String> = Channel::ALL
        .iter()
        .map(|&channel| {
            let (value, level) = channel_cell(snapshot, channel);
            format!("{} {}", channel_label(channel), colorize_value(value, level))
        })
        .collect();

    let means: Vec<String> = Channel::ALL
        .iter()
        .filter_map(|&channel| {
            snapshot.stats.get(channel).map(|s| {
                format!(
                    "{} {:.prec$}",
                    channel_label(channel),
                    s.mean,
                    prec = channel.precision()
                )
            })
        })
        .collect();

    let mut line = format!(
        "{} {} {}  {}",
        level_badge(snapshot.level),
        snapshot.reading.timestamp.format("%H:%M:%S").to_string().dimmed(),
        values.join("  "),
        format!("avg[{}] {}", snapshot.window_len, means.join(" ")).dimmed()
    );
    if !snapshot.messages.is_empty() {
        line.push_str("  ");
        line.push_str(&sanitize_terminal(&snapshot.joined_messages()));
    }
    line
}

pub fn print_section_header(title: &str) {
    println!("{}", title.bold().cyan());
    let display_width = title.chars().count();
    println!("{}", "─".repeat(display_width).cyan());
}

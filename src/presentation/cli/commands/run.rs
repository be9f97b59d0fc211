use std::future::Future;

use colored::Colorize;

use crate::application::services::runner::{RunEnd, RunSummary, StreamRunner, TickControl};
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::ports::source::ReadingSource;
use crate::presentation::cli::formatters::snapshot_fmt::{format_snapshot, print_section_header};

/// Presentation options for a streaming run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub max_ticks: Option<u64>,
    pub json: bool,
}

/// Render one snapshot as a terminal line or a JSON line.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_snapshot(snapshot: &Snapshot, options: &RunOptions) -> anyhow::Result<String> {
    if options.json {
        Ok(serde_json::to_string(snapshot)?)
    } else {
        Ok(format_snapshot(snapshot))
    }
}

/// Stream readings through the engine until the source is exhausted,
/// `shutdown` resolves (Ctrl+C) or `max_ticks` is reached.
///
/// # Errors
///
/// Returns an error if a tick fails to persist its reading or alert, or the
/// source cannot be read.
pub async fn run_stream<S, F>(
    runner: &mut StreamRunner<'_, S>,
    shutdown: F,
    options: &RunOptions,
) -> anyhow::Result<RunSummary>
where
    S: ReadingSource,
    F: Future<Output = ()>,
{
    if !options.json {
        print_section_header(&format!(
            "📡 {} every {}ms",
            runner.source().describe(),
            runner.interval().as_millis()
        ));
    }

    let mut seen = 0u64;
    let summary = runner
        .run(shutdown, |snapshot| {
            match render_snapshot(snapshot, options) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!("Failed to render snapshot: {e}"),
            }
            seen += 1;
            if options.max_ticks.is_some_and(|max| seen >= max) {
                TickControl::Stop
            } else {
                TickControl::Continue
            }
        })
        .await?;

    if !options.json {
        println!();
        println!("{}", summary_line(&summary));
    }
    Ok(summary)
}

#[must_use]
pub fn summary_line(summary: &RunSummary) -> String {
    let reason = match summary.ended {
        RunEnd::StreamEnded => "stream ended",
        RunEnd::Interrupted => "interrupted",
        RunEnd::Stopped => "tick limit reached",
    };
    let alerts = if summary.alerts > 0 {
        format!("{} alert(s)", summary.alerts).yellow().bold()
    } else {
        "no alerts".green()
    };
    format!("{} tick(s), {alerts} ({reason})", summary.ticks.to_string().bold())
}

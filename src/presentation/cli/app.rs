use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// envwatch: environmental sensor monitor
///
/// Streams temperature, humidity and luminosity readings through a sliding
/// window, raises two-tier threshold alerts and keeps the full history in SQLite.
#[derive(Parser, Debug)]
#[command(name = "envwatch")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run` on the last source)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream a CSV or JSON reading file through the engine
    #[command(alias = "r")]
    Run {
        /// Reading file (.csv or .json); defaults to the last file streamed
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Tick interval in milliseconds (200-10000, default: config)
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Stop after this many ticks (at least 1)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_ticks: Option<u64>,

        /// Keep readings and alerts in memory instead of the database
        #[arg(long)]
        dry_run: bool,

        /// Emit one JSON snapshot per line
        #[arg(long)]
        json: bool,
    },

    /// Show the most recent persisted readings
    #[command(alias = "rd")]
    Readings {
        /// Number of readings to show
        #[arg(short = 'n', long, default_value = "20")]
        last: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the most recent alert events
    #[command(alias = "a")]
    Alerts {
        /// Number of alerts to show
        #[arg(short = 'n', long, default_value = "20")]
        last: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the full reading history as CSV
    #[command(alias = "e")]
    Export {
        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },
}

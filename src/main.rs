use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use envwatch::application::config::AppConfig;
use envwatch::application::services::engine::{Engine, EngineConfig};
use envwatch::application::services::runner::StreamRunner;
use envwatch::domain::ports::store::{AlertStore, ReadingStore};
use envwatch::infrastructure::persistence::in_memory_store::InMemoryStore;
use envwatch::infrastructure::persistence::sqlite_store::SqliteStore;
use envwatch::infrastructure::sources::FileSource;
use envwatch::presentation::cli::app::{Cli, Commands};
use envwatch::presentation::cli::commands::alerts::run_alerts;
use envwatch::presentation::cli::commands::export::run_export;
use envwatch::presentation::cli::commands::readings::run_readings;
use envwatch::presentation::cli::commands::run::{run_stream, RunOptions};

fn print_banner() {
    println!("{}", "━".repeat(40).cyan());
    println!("{}", "  ENVWATCH — Sensor Stream Monitor".bold().cyan());
    println!("{}", "━".repeat(40).cyan());
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(config: &AppConfig) -> anyhow::Result<SqliteStore> {
    SqliteStore::new(&config.database.path)
        .with_context(|| format!("Failed to open database {}", config.database.path))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Ctrl+C handler unavailable: {e}");
        std::future::pending::<()>().await;
    }
}

struct RunArgs {
    source: Option<PathBuf>,
    interval_ms: Option<u64>,
    max_ticks: Option<u64>,
    dry_run: bool,
    json: bool,
}

async fn run(
    config: &mut AppConfig,
    config_path: Option<&Path>,
    args: RunArgs,
) -> anyhow::Result<()> {
    let path = match args.source.or_else(|| config.source.last_file.as_ref().map(PathBuf::from)) {
        Some(path) => path,
        None => anyhow::bail!("No reading file given. Use `envwatch run --source <FILE>`"),
    };
    let source = FileSource::open(&path)?;

    if config.remember_source(&path) {
        let saved = match config_path {
            Some(p) => config.save_to(p),
            None => config.save(),
        };
        if let Err(e) = saved {
            tracing::warn!("Could not remember source file: {e:#}");
        }
    }

    // Manual DI: main.rs is the only place that knows concrete types
    let sqlite;
    let memory;
    let (reading_store, alert_store): (&dyn ReadingStore, &dyn AlertStore) = if args.dry_run {
        tracing::info!("Dry run: readings and alerts are kept in memory");
        memory = InMemoryStore::new();
        (&memory as &dyn ReadingStore, &memory as &dyn AlertStore)
    } else {
        sqlite = open_store(config)?;
        (&sqlite as &dyn ReadingStore, &sqlite as &dyn AlertStore)
    };

    let engine_config = EngineConfig::from(&*config);
    let options = RunOptions {
        max_ticks: args.max_ticks,
        json: args.json,
    };
    let interval = args
        .interval_ms
        .map_or_else(|| config.tick_interval(), Duration::from_millis);

    let engine = Engine::new(engine_config, reading_store, alert_store);
    let mut runner = StreamRunner::new(engine, source, interval);

    if !args.json {
        print_banner();
    }
    run_stream(&mut runner, shutdown_signal(), &options).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    // Load configuration
    let mut config = if let Some(ref path) = cli.config {
        AppConfig::load_or_create(path)?
    } else {
        AppConfig::load()?
    };

    match cli.command {
        Some(Commands::Run {
            source,
            interval_ms,
            max_ticks,
            dry_run,
            json,
        }) => {
            let args = RunArgs {
                source,
                interval_ms,
                max_ticks,
                dry_run,
                json,
            };
            run(&mut config, cli.config.as_deref(), args).await?;
        }
        None => {
            let args = RunArgs {
                source: None,
                interval_ms: None,
                max_ticks: None,
                dry_run: false,
                json: false,
            };
            run(&mut config, cli.config.as_deref(), args).await?;
        }
        Some(Commands::Readings { last, json }) => {
            let store = open_store(&config)?;
            run_readings(&store, last, json)?;
        }
        Some(Commands::Alerts { last, json }) => {
            let store = open_store(&config)?;
            run_alerts(&store, last, json)?;
        }
        Some(Commands::Export { output }) => {
            let store = open_store(&config)?;
            run_export(&store, &output)?;
        }
    }

    Ok(())
}

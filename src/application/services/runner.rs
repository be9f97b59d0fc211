use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use super::engine::{Engine, EngineError, TickOutcome};
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::ports::source::ReadingSource;

pub const MIN_INTERVAL_MS: u64 = 200;
pub const MAX_INTERVAL_MS: u64 = 10_000;
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Clamp a tick interval to `MIN_INTERVAL_MS..=MAX_INTERVAL_MS`.
#[must_use]
pub fn clamp_interval(interval_ms: u64) -> Duration {
    Duration::from_millis(interval_ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS))
}

/// What the snapshot consumer wants the runner to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    /// Reschedule subsequent ticks at this interval (clamped)
    SetInterval(u64),
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    StreamEnded,
    /// The shutdown future resolved (Ctrl+C)
    Interrupted,
    /// The consumer returned `TickControl::Stop`
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub alerts: u64,
    pub ended: RunEnd,
}

/// Drives an [`Engine`] from a [`ReadingSource`] at a fixed interval.
///
/// Every tick runs to completion before the next one is scheduled; shutdown
/// is only observed while waiting for the next tick.
pub struct StreamRunner<'a, S: ReadingSource> {
    engine: Engine<'a>,
    source: S,
    interval: Duration,
}

impl<'a, S: ReadingSource> StreamRunner<'a, S> {
    #[must_use]
    pub fn new(engine: Engine<'a>, source: S, interval: Duration) -> Self {
        let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(MAX_INTERVAL_MS);
        Self {
            engine,
            source,
            interval: clamp_interval(interval_ms),
        }
    }

    /// Change the interval used for ticks scheduled from now on. Returns the
    /// effective (clamped) interval.
    pub fn set_interval(&mut self, interval_ms: u64) -> Duration {
        let interval = clamp_interval(interval_ms);
        if interval != self.interval {
            tracing::info!("Tick interval {}ms -> {}ms", self.interval.as_millis(), interval.as_millis());
        }
        self.interval = interval;
        interval
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn engine(&self) -> &Engine<'a> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<'a> {
        &mut self.engine
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Tick once per interval until the stream ends, `shutdown` resolves or
    /// `on_snapshot` asks to stop.
    ///
    /// # Errors
    ///
    /// Returns the first `EngineError` raised by a tick; the run halts there.
    pub async fn run<F, C>(&mut self, shutdown: F, mut on_snapshot: C) -> Result<RunSummary, EngineError>
    where
        F: Future<Output = ()>,
        C: FnMut(&Snapshot) -> TickControl,
    {
        tracing::info!(
            "Streaming {} every {}ms",
            self.source.describe(),
            self.interval.as_millis()
        );
        let mut ticks = 0u64;
        let mut alerts = 0u64;
        let summary = |ended, ticks, alerts| RunSummary { ticks, alerts, ended };

        let mut period = self.interval;
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                () = &mut shutdown => {
                    tracing::info!("Shutdown requested after {ticks} tick(s)");
                    return Ok(summary(RunEnd::Interrupted, ticks, alerts));
                }
            }

            let snapshot = match self.engine.step(&mut self.source) {
                Ok(TickOutcome::Processed(snapshot)) => snapshot,
                Ok(TickOutcome::StreamEnded) => {
                    return Ok(summary(RunEnd::StreamEnded, ticks, alerts));
                }
                Err(e) => {
                    tracing::error!("Tick failed, halting stream: {e}");
                    return Err(e);
                }
            };

            ticks += 1;
            if snapshot.level.is_alert() {
                alerts += 1;
            }

            match on_snapshot(&snapshot) {
                TickControl::Continue => {}
                TickControl::SetInterval(interval_ms) => {
                    self.set_interval(interval_ms);
                }
                TickControl::Stop => {
                    tracing::info!("Stream stopped by consumer after {ticks} tick(s)");
                    return Ok(summary(RunEnd::Stopped, ticks, alerts));
                }
            }

            if self.interval != period {
                period = self.interval;
                ticker = tokio::time::interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            }
        }
    }
}

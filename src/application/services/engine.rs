use thiserror::Error;

use crate::domain::entities::alert_event::AlertEvent;
use crate::domain::entities::reading::Reading;
use crate::domain::entities::snapshot::{ChannelLevels, Snapshot};
use crate::domain::entities::MESSAGE_SEPARATOR;
use crate::domain::ports::source::{ReadingSource, SourceError};
use crate::domain::ports::store::{AlertStore, ReadingStore, StoreError};
use crate::domain::rules::Classifier;
use crate::domain::stats::WindowStats;
use crate::domain::value_objects::alert_level::AlertLevel;
use crate::domain::value_objects::thresholds::ThresholdSet;
use crate::domain::window::{SlidingWindow, DEFAULT_CAPACITY};

/// Immutable engine settings, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub window_capacity: usize,
    pub thresholds: ThresholdSet,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_CAPACITY,
            thresholds: ThresholdSet::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to persist reading taken at {}: {source}", .reading.timestamp)]
    PersistReading {
        reading: Reading,
        #[source]
        source: StoreError,
    },
    #[error("failed to persist {level} alert \"{message}\": {source}")]
    PersistAlert {
        level: AlertLevel,
        message: String,
        reading: Reading,
        #[source]
        source: StoreError,
    },
    #[error("reading source failed: {0}")]
    Source(#[from] SourceError),
    #[error("engine stopped: the reading stream has ended")]
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    /// Terminal: the source reported end-of-stream
    Stopped,
}

/// Result of pulling one item from a reading source
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Processed(Snapshot),
    StreamEnded,
}

/// Orchestrates one tick per reading: persist → window → stats → classify → alert.
///
/// The engine is the sole owner of the sliding window and the only writer to
/// the stores. There is no rollback: a reading persisted before a failed
/// alert write stays persisted and the failure is returned to the caller.
pub struct Engine<'a> {
    config: EngineConfig,
    classifier: Classifier,
    window: SlidingWindow,
    reading_store: &'a dyn ReadingStore,
    alert_store: &'a dyn AlertStore,
    state: EngineState,
    current_level: AlertLevel,
    ticks: u64,
}

impl<'a> Engine<'a> {
    #[must_use]
    pub fn new(
        config: EngineConfig,
        reading_store: &'a dyn ReadingStore,
        alert_store: &'a dyn AlertStore,
    ) -> Self {
        Self::with_classifier(config, Classifier::default(), reading_store, alert_store)
    }

    #[must_use]
    pub fn with_classifier(
        config: EngineConfig,
        classifier: Classifier,
        reading_store: &'a dyn ReadingStore,
        alert_store: &'a dyn AlertStore,
    ) -> Self {
        let window = SlidingWindow::new(config.window_capacity);
        Self {
            config,
            classifier,
            window,
            reading_store,
            alert_store,
            state: EngineState::Running,
            current_level: AlertLevel::Normal,
            ticks: 0,
        }
    }

    /// Process one reading and return the resulting snapshot.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Stopped` once the stream has ended,
    /// `EngineError::PersistReading` if the reading cannot be appended (the
    /// window is then left untouched), or `EngineError::PersistAlert` if the
    /// alert cannot be appended (the reading is already persisted and pushed).
    pub fn tick(&mut self, reading: Reading) -> Result<Snapshot, EngineError> {
        if self.state == EngineState::Stopped {
            return Err(EngineError::Stopped);
        }

        self.reading_store
            .append_reading(&reading)
            .map_err(|source| EngineError::PersistReading {
                reading: reading.clone(),
                source,
            })?;
        self.window.push(reading.clone());
        self.ticks += 1;

        let stats = WindowStats::compute(&self.window);
        let classification = self.classifier.classify(&reading, &self.config.thresholds);
        let level = classification.level;
        let channel_levels = ChannelLevels::from(&classification);
        let messages = classification.messages();

        if level != self.current_level {
            tracing::info!("Alert level {} -> {}", self.current_level, level);
        }
        self.current_level = level;

        if level.is_alert() {
            let message = messages.join(MESSAGE_SEPARATOR);
            tracing::warn!("{level}: {message}");
            let event = AlertEvent::new(level, message, Some(reading.clone()));
            self.alert_store
                .append_alert(&event)
                .map_err(|source| EngineError::PersistAlert {
                    level,
                    message: event.message.clone(),
                    reading: reading.clone(),
                    source,
                })?;
        } else {
            tracing::debug!("Reading within thresholds");
        }

        Ok(Snapshot {
            reading,
            stats,
            level,
            channel_levels,
            messages,
            window_len: self.window.len(),
        })
    }

    /// Pull the next reading from `source` and tick on it.
    ///
    /// On end-of-stream the engine moves to the terminal `Stopped` state; any
    /// later call reports `StreamEnded` again without touching the source.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Source` if the source fails, or any error from [`Engine::tick`].
    pub fn step(&mut self, source: &mut dyn ReadingSource) -> Result<TickOutcome, EngineError> {
        if self.state == EngineState::Stopped {
            return Ok(TickOutcome::StreamEnded);
        }

        match source.next_reading()? {
            Some(reading) => self.tick(reading).map(TickOutcome::Processed),
            None => {
                tracing::info!(
                    "Reading stream ended after {} tick(s): {}",
                    self.ticks,
                    source.describe()
                );
                self.state = EngineState::Stopped;
                Ok(TickOutcome::StreamEnded)
            }
        }
    }

    /// Clear the window and the displayed alert level. Persisted history is
    /// left untouched and the engine state does not change.
    pub fn reset(&mut self) {
        self.window.reset();
        self.current_level = AlertLevel::Normal;
        tracing::debug!("Window reset");
    }

    /// Statistics over the current window
    #[must_use]
    pub fn stats(&self) -> WindowStats {
        WindowStats::compute(&self.window)
    }

    #[must_use]
    pub const fn window(&self) -> &SlidingWindow {
        &self.window
    }

    #[must_use]
    pub const fn current_level(&self) -> AlertLevel {
        self.current_level
    }

    #[must_use]
    pub const fn state(&self) -> EngineState {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Readings successfully persisted and pushed since construction
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }
}

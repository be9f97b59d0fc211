use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::services::engine::EngineConfig;
use crate::application::services::runner;
use crate::domain::value_objects::thresholds::ThresholdSet;
use crate::domain::window::DEFAULT_CAPACITY;

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

/// General settings: tick interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

/// Sliding window sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

/// Two-tier alert thresholds per sensor channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_temperature_warning")]
    pub temperature_warning: f64,
    #[serde(default = "default_temperature_critical")]
    pub temperature_critical: f64,
    #[serde(default = "default_humidity_warning")]
    pub humidity_warning: f64,
    #[serde(default = "default_humidity_critical")]
    pub humidity_critical: f64,
    #[serde(default = "default_luminosity_warning")]
    pub luminosity_warning: f64,
    #[serde(default = "default_luminosity_critical")]
    pub luminosity_critical: f64,
}

/// Database storage path (tilde-expanded at point of use).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

/// Last reading file streamed by `run`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub last_file: Option<String>,
}

// --- Defaults ---

const fn default_interval_ms() -> u64 {
    runner::DEFAULT_INTERVAL_MS
}

const fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

const fn default_temperature_warning() -> f64 {
    30.0
}

const fn default_temperature_critical() -> f64 {
    35.0
}

const fn default_humidity_warning() -> f64 {
    30.0
}

const fn default_humidity_critical() -> f64 {
    20.0
}

const fn default_luminosity_warning() -> f64 {
    800.0
}

const fn default_luminosity_critical() -> f64 {
    1000.0
}

// NOTE: Stored as raw string with tilde, expanded by SqliteStore::new.
fn default_database_path() -> String {
    "~/.local/share/envwatch/envwatch.db".into()
}

// --- Default impls ---

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            temperature_warning: default_temperature_warning(),
            temperature_critical: default_temperature_critical(),
            humidity_warning: default_humidity_warning(),
            humidity_critical: default_humidity_critical(),
            luminosity_warning: default_luminosity_warning(),
            luminosity_critical: default_luminosity_critical(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from default path or create default config file
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Load from a specific path, or create a default config file if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is invalid,
    /// or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Load from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to default path
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path, creating parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Default location: `<config dir>/envwatch/config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("envwatch").join("config.toml"))
    }

    /// Configured tick interval, clamped to the supported range.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        runner::clamp_interval(self.general.interval_ms)
    }

    /// Record the file last streamed by `run`. Returns `true` if it changed.
    pub fn remember_source(&mut self, path: &Path) -> bool {
        let path = path.display().to_string();
        if self.source.last_file.as_deref() == Some(path.as_str()) {
            return false;
        }
        self.source.last_file = Some(path);
        true
    }
}

impl From<&ThresholdConfig> for ThresholdSet {
    fn from(config: &ThresholdConfig) -> Self {
        Self {
            temperature_warning: config.temperature_warning,
            temperature_critical: config.temperature_critical,
            humidity_warning: config.humidity_warning,
            humidity_critical: config.humidity_critical,
            luminosity_warning: config.luminosity_warning,
            luminosity_critical: config.luminosity_critical,
        }
    }
}

impl From<&AppConfig> for EngineConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            window_capacity: config.window.capacity.max(1),
            thresholds: ThresholdSet::from(&config.thresholds),
        }
    }
}

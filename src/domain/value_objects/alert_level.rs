use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// System-wide alert level derived from a single reading
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    #[default]
    Normal,
    Warning,
    Critical,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown alert level: {0}")]
pub struct ParseAlertLevelError(pub String);

impl AlertLevel {
    /// Lowercase name, as stored in the `alerts.level` column
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    #[must_use]
    pub const fn is_alert(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertLevel {
    type Err = ParseAlertLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "warning" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            other => Err(ParseAlertLevelError(other.to_string())),
        }
    }
}

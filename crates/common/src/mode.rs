//! Run mode configuration.
//!
//! The bot runs against simulated fills (paper) by default; live mode is
//! reserved for an external execution adapter and is refused at startup
//! until one exists.

use std::fmt;
use std::str::FromStr;

/// How generated order intents are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Simulated fills, no external side effects.
    #[default]
    Paper,
    /// Real order routing via an external execution adapter.
    Live,
}

impl RunMode {
    /// Returns true if this is paper mode.
    pub fn is_paper(&self) -> bool {
        matches!(self, Self::Paper)
    }

    /// Returns true if this is live mode.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    /// Load mode from the `RUN_MODE` env var.
    ///
    /// Returns `Paper` if not set or invalid.
    pub fn from_env() -> Self {
        std::env::var("RUN_MODE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paper => write!(f, "paper"),
            Self::Live => write!(f, "live"),
        }
    }
}

impl FromStr for RunMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paper" | "dry" | "dry-run" | "sim" => Ok(Self::Paper),
            "live" | "prod" | "production" => Ok(Self::Live),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Error parsing a run mode string.
#[derive(Debug, Clone)]
pub struct ParseModeError(String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid run mode '{}', expected 'paper' or 'live'", self.0)
    }
}

impl std::error::Error for ParseModeError {}

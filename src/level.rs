//! Log level ordering and parsing.
//!
//! # Responsibilities
//! - Define the ordered severity scale shared by every backend
//! - Convert levels to their canonical lowercase names
//! - Parse user-supplied verbosity strings (case-insensitive)
//!
//! # Design Decisions
//! - Quiet is a threshold-only sentinel: no entry is ever logged at Quiet
//! - The empty string parses as Info so an unset config value stays useful

use std::fmt;
use std::str::FromStr;

use crate::logger::LogError;

/// Ordered log severity. Comparisons follow declaration order, least to
/// most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Voluminous diagnostics, usually disabled in production.
    Debug,
    /// Default priority.
    #[default]
    Info,
    /// More important than Info, may need individual human review.
    Warn,
    /// High priority, should require a human review.
    Error,
    /// Threshold sentinel that suppresses all output.
    Quiet,
}

impl Level {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Quiet => "quiet",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            // The empty string keeps an unset verbosity useful.
            "" | "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "quiet" => Ok(Level::Quiet),
            _ => Err(LogError::UnknownLevel(s.to_string())),
        }
    }
}

//! Logger configuration.
//!
//! # Responsibilities
//! - Define the serde-facing configuration record consumed by backend
//!   constructors
//! - Validate verbosity and formatter names before a backend is built
//!
//! # Design Decisions
//! - Validation returns descriptive errors at construction time; nothing
//!   is silently coerced

use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::logger::LogError;

/// Name of the JSON formatter.
pub const FORMATTER_JSON: &str = "json";
/// Name of the human-oriented console formatter.
pub const FORMATTER_CONSOLE: &str = "console";

/// Configurable options for the logger.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum severity: one of debug, info, warn, error, quiet.
    pub verbosity: String,
    /// Output encoding: "json" or "console".
    pub formatter: String,
    /// ANSI colors for the console formatter.
    pub with_color: bool,
    /// "stdout", "stderr", or a file path.
    pub output: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            verbosity: Level::Info.to_string(),
            formatter: FORMATTER_CONSOLE.to_string(),
            with_color: true,
            output: "stdout".to_string(),
        }
    }
}

impl LogConfig {
    /// Check verbosity and formatter names.
    pub fn validate(&self) -> Result<(), LogError> {
        self.verbosity.parse::<Level>()?;
        match self.formatter.as_str() {
            FORMATTER_JSON | FORMATTER_CONSOLE => Ok(()),
            other => Err(LogError::UnknownFormatter(other.to_string())),
        }
    }

    /// Parsed verbosity level.
    pub fn level(&self) -> Result<Level, LogError> {
        self.verbosity.parse()
    }
}

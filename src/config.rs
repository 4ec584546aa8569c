//! Logging configuration.
//!
//! Bots read their logging settings from the environment:
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `LOG_LEVEL` | threshold, case-insensitive, unknown → INFO | `info` |
//! | `JSON_LOGGING` | JSON lines instead of text | `false` |
//! | `DEBUG` | forces the DEBUG threshold | `false` |
//!
//! The same settings can be embedded in a larger serde-deserialized config.

use serde::{Deserialize, Serialize};

use crate::global;
use crate::handler::LogFormat;
use crate::level::Level;
use crate::logger::Logger;

/// Environment variable holding the level string.
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
/// Environment variable toggling JSON output.
pub const ENV_JSON_LOGGING: &str = "JSON_LOGGING";
/// Environment variable toggling debug mode.
pub const ENV_DEBUG: &str = "DEBUG";

/// Logging settings for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Severity threshold.
    pub level: Level,
    /// Emit JSON lines instead of text.
    pub json: bool,
    /// Debug mode; overrides `level` with DEBUG.
    pub debug_mode: bool,
}

impl LogConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// Empty or unparseable booleans keep their defaults, matching how the
    /// bots treat the rest of their environment.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            level: lookup(ENV_LOG_LEVEL)
                .filter(|v| !v.is_empty())
                .map_or(defaults.level, |v| Level::parse_lenient(&v)),
            json: lookup(ENV_JSON_LOGGING)
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.json),
            debug_mode: lookup(ENV_DEBUG)
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.debug_mode),
        }
    }

    /// Threshold after applying debug mode.
    #[must_use]
    pub const fn effective_level(&self) -> Level {
        if self.debug_mode { Level::Debug } else { self.level }
    }

    /// Output format.
    #[must_use]
    pub const fn format(&self) -> LogFormat {
        LogFormat::from_json_flag(self.json)
    }

    /// Builds a stdout logger without publishing it.
    #[must_use]
    pub fn build(&self) -> Logger {
        Logger::stdout(self.effective_level(), self.format())
    }

    /// Publishes this configuration as the process-wide logger.
    pub fn init(&self) {
        global::set_logger(self.build());
    }
}

/// Parses the boolean spellings bots accept in their environment.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

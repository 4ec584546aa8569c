//! Severity levels.
//!
//! Configuration strings are matched case-insensitively. The facade never
//! rejects a level: anything it does not recognize resolves to
//! [`Level::Info`]. Callers that want rejection use the strict [`FromStr`]
//! implementation instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseLevelError;

/// Record severity, ordered `Debug < Info < Warn < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Level {
    /// Diagnostic detail, hidden unless explicitly enabled.
    Debug,
    /// Normal operational messages (default threshold).
    #[default]
    Info,
    /// Something unexpected that does not stop the bot.
    Warn,
    /// A failed operation.
    Error,
}

impl Level {
    /// All levels in ascending severity.
    pub const ALL: [Self; 4] = [Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// Parses a configuration string, falling back to [`Level::Info`].
    ///
    /// ```
    /// use botlog::Level;
    ///
    /// assert_eq!(Level::parse_lenient("debug"), Level::Debug);
    /// assert_eq!(Level::parse_lenient("ERROR"), Level::Error);
    /// assert_eq!(Level::parse_lenient("verbose"), Level::Info);
    /// assert_eq!(Level::parse_lenient(""), Level::Info);
    /// ```
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Upper-case name as written into records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Lower-case `tracing` filter directive for this threshold.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLevelError {
                input: s.to_owned(),
            })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Self::Debug,
            tracing::Level::INFO => Self::Info,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::ERROR => Self::Error,
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Config files get the same fallback as `initialize`.
impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn recognized_names_any_case() {
        for (input, expected) in [
            ("debug", Level::Debug),
            ("DEBUG", Level::Debug),
            ("Info", Level::Info),
            ("wArN", Level::Warn),
            ("error", Level::Error),
        ] {
            assert_eq!(Level::parse_lenient(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn unrecognized_falls_back_to_info() {
        for input in ["", " ", "trace", "warning", "fatal", "debug ", "0"] {
            assert_eq!(Level::parse_lenient(input), Level::Info, "input {input:?}");
        }
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        let err = "loud".parse::<Level>().unwrap_err();
        assert_eq!(err.input, "loud");
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn ordering_matches_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn display_is_upper_case() {
        assert_eq!(Level::Warn.to_string(), "WARN");
    }

    #[test]
    fn tracing_trace_maps_to_debug() {
        assert_eq!(Level::from(tracing::Level::TRACE), Level::Debug);
        assert_eq!(Level::from(tracing::Level::ERROR), Level::Error);
    }

    #[test]
    fn deserialize_is_lenient() {
        let level: Level = serde_json::from_str("\"Warn\"").unwrap();
        assert_eq!(level, Level::Warn);
        let level: Level = serde_json::from_str("\"chatty\"").unwrap();
        assert_eq!(level, Level::Info);
    }

    proptest! {
        #[test]
        fn case_never_matters(idx in 0usize..4, mask in proptest::collection::vec(any::<bool>(), 5)) {
            let level = Level::ALL[idx];
            let mixed: String = level
                .as_str()
                .chars()
                .zip(mask.iter().cycle())
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
                .collect();
            prop_assert_eq!(Level::parse_lenient(&mixed), level);
        }

        #[test]
        fn arbitrary_input_never_panics(s in ".*") {
            let level = Level::parse_lenient(&s);
            if !Level::ALL.iter().any(|l| l.as_str().eq_ignore_ascii_case(&s)) {
                prop_assert_eq!(level, Level::Info);
            }
        }
    }
}

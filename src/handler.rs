//! Record encoding and output.
//!
//! A [`Handler`] owns a severity threshold and a writer. Two encodings are
//! provided:
//!
//! ```text
//! text: time=2026-01-02T03:04:05Z level=INFO msg="Bot starting up" component=startup
//! json: {"time":"2026-01-02T03:04:05Z","level":"INFO","msg":"Bot starting up","component":"startup"}
//! ```
//!
//! The `time` field is always rewritten to RFC3339 (UTC, whole seconds).
//! Write failures are dropped; logging must never take the bot down.

use std::fmt::Write as _;
use std::io::Write;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::value::Attr;

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// `key=value` lines for humans.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Maps the `json_format` switch used by configuration.
    #[must_use]
    pub const fn from_json_flag(json_format: bool) -> Self {
        if json_format { Self::Json } else { Self::Text }
    }
}

/// A single log event on its way to a handler.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    /// When the record was created.
    pub time: DateTime<Utc>,
    /// Severity.
    pub level: Level,
    /// Message text.
    pub message: &'a str,
    /// Attributes inherited from a derived logger.
    pub context: &'a [Attr],
    /// Attributes supplied at the call site.
    pub attrs: &'a [Attr],
}

impl<'a> Record<'a> {
    /// Inherited attributes followed by call-site attributes.
    pub fn fields(&self) -> impl Iterator<Item = &'a Attr> + use<'a> {
        self.context.iter().chain(self.attrs.iter())
    }

    /// The `time` field as written to output.
    #[must_use]
    pub fn timestamp(&self) -> String {
        format_timestamp(self.time)
    }
}

/// Formats a timestamp as RFC3339 with a `Z` suffix.
#[must_use]
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Encodes and writes records.
///
/// Implementations must be safe to call from many threads at once and must
/// write each record as one uninterrupted line.
pub trait Handler: Send + Sync {
    /// Whether a record at `level` would be written.
    fn enabled(&self, level: Level) -> bool;

    /// Encodes and writes one record. Callers check [`enabled`](Self::enabled) first.
    fn handle(&self, record: &Record<'_>);
}

/// Mutex-guarded line writer shared by both encodings.
struct Sink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Sink {
    fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    fn write_line(&self, line: &str) {
        // A poisoned lock still guards a usable writer.
        let mut w = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = w.write_all(line.as_bytes());
        let _ = w.flush();
    }
}

// Box<dyn Write> is not Debug; provide a manual impl.
impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Writes `key=value` lines.
///
/// Values that are empty or contain whitespace, `=`, `"` or control
/// characters are double-quoted with escapes.
#[derive(Debug)]
pub struct TextHandler {
    level: Level,
    sink: Sink,
}

impl TextHandler {
    /// Creates a text handler writing to `writer`.
    #[must_use]
    pub fn new(level: Level, writer: Box<dyn Write + Send>) -> Self {
        Self {
            level,
            sink: Sink::new(writer),
        }
    }

    /// Creates a text handler writing to stdout.
    #[must_use]
    pub fn stdout(level: Level) -> Self {
        Self::new(level, Box::new(std::io::stdout()))
    }
}

impl Handler for TextHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &Record<'_>) {
        self.sink.write_line(&encode_text(record));
    }
}

fn encode_text(record: &Record<'_>) -> String {
    let mut line = String::with_capacity(128);
    push_text_pair(&mut line, "time", &record.timestamp());
    push_text_pair(&mut line, "level", record.level.as_str());
    push_text_pair(&mut line, "msg", record.message);
    for attr in record.fields() {
        push_text_pair(&mut line, &attr.key, &attr.value.to_string());
    }
    line.push('\n');
    line
}

fn push_text_pair(line: &mut String, key: &str, value: &str) {
    if !line.is_empty() {
        line.push(' ');
    }
    push_text_atom(line, key);
    line.push('=');
    push_text_atom(line, value);
}

fn push_text_atom(line: &mut String, s: &str) {
    if needs_quoting(s) {
        let _ = write!(line, "{s:?}");
    } else {
        line.push_str(s);
    }
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '=' || c == '"')
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Writes one JSON object per line.
#[derive(Debug)]
pub struct JsonHandler {
    level: Level,
    sink: Sink,
}

impl JsonHandler {
    /// Creates a JSON handler writing to `writer`.
    #[must_use]
    pub fn new(level: Level, writer: Box<dyn Write + Send>) -> Self {
        Self {
            level,
            sink: Sink::new(writer),
        }
    }

    /// Creates a JSON handler writing to stdout.
    #[must_use]
    pub fn stdout(level: Level) -> Self {
        Self::new(level, Box::new(std::io::stdout()))
    }
}

impl Handler for JsonHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &Record<'_>) {
        if let Ok(mut line) = serde_json::to_string(&JsonLine(record)) {
            line.push('\n');
            self.sink.write_line(&line);
        }
    }
}

/// Serializes a record as a flat object, preserving field order.
struct JsonLine<'r, 'a>(&'r Record<'a>);

impl Serialize for JsonLine<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = self.0;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("time", &record.timestamp())?;
        map.serialize_entry("level", &record.level)?;
        map.serialize_entry("msg", record.message)?;
        for attr in record.fields() {
            map.serialize_entry(attr.key.as_ref(), &attr.value)?;
        }
        map.end()
    }
}

//! Logger handles.
//!
//! A [`Logger`] is a cheap, cloneable view over a shared [`Handler`] plus a
//! list of attributes stamped onto every record it emits. Deriving a logger
//! with [`Logger::with`] never changes the logger it came from, so a handle
//! can be passed to a component, scoped, and passed further down.

use std::io::Write;
use std::sync::Arc;

use chrono::Utc;

use crate::handler::{Handler, JsonHandler, LogFormat, Record, TextHandler};
use crate::level::Level;
use crate::value::{Attr, Value};

/// Attribute key carrying the component tag.
pub const COMPONENT_KEY: &str = "component";

/// A structured logger.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    context: Arc<[Attr]>,
}

// dyn Handler is not Debug; provide a manual impl.
impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    /// INFO threshold, text format, stdout.
    fn default() -> Self {
        Self::stdout(Level::Info, LogFormat::Text)
    }
}

impl Logger {
    /// Wraps an arbitrary handler.
    #[must_use]
    pub fn new(handler: impl Handler + 'static) -> Self {
        Self {
            handler: Arc::new(handler),
            context: Arc::from(Vec::new()),
        }
    }

    /// Logger writing to stdout in the given format.
    #[must_use]
    pub fn stdout(level: Level, format: LogFormat) -> Self {
        match format {
            LogFormat::Text => Self::new(TextHandler::stdout(level)),
            LogFormat::Json => Self::new(JsonHandler::stdout(level)),
        }
    }

    /// Logger writing to any writer in the given format.
    #[must_use]
    pub fn with_writer(level: Level, format: LogFormat, writer: impl Write + Send + 'static) -> Self {
        let writer: Box<dyn Write + Send> = Box::new(writer);
        match format {
            LogFormat::Text => Self::new(TextHandler::new(level, writer)),
            LogFormat::Json => Self::new(JsonHandler::new(level, writer)),
        }
    }

    /// Returns a logger that adds `attrs` to every record.
    #[must_use]
    pub fn with(&self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        let context: Vec<Attr> = self.context.iter().cloned().chain(attrs).collect();
        Self {
            handler: Arc::clone(&self.handler),
            context: context.into(),
        }
    }

    /// Returns a logger that tags every record with `component`.
    #[must_use]
    pub fn with_component(&self, component: impl Into<Value>) -> Self {
        self.with([Attr::new(COMPONENT_KEY, component)])
    }

    /// Attributes this logger adds to every record.
    #[must_use]
    pub fn context(&self) -> &[Attr] {
        &self.context
    }

    /// Whether a record at `level` would be written.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    /// Emits a record. Records below the handler's threshold are dropped.
    pub fn log(&self, level: Level, message: &str, attrs: &[Attr]) {
        if !self.handler.enabled(level) {
            return;
        }
        self.handler.handle(&Record {
            time: Utc::now(),
            level,
            message,
            context: &self.context,
            attrs,
        });
    }

    /// Emits a DEBUG record.
    pub fn debug(&self, message: &str, attrs: &[Attr]) {
        self.log(Level::Debug, message, attrs);
    }

    /// Emits an INFO record.
    pub fn info(&self, message: &str, attrs: &[Attr]) {
        self.log(Level::Info, message, attrs);
    }

    /// Emits a WARN record.
    pub fn warn(&self, message: &str, attrs: &[Attr]) {
        self.log(Level::Warn, message, attrs);
    }

    /// Emits an ERROR record.
    pub fn error(&self, message: &str, attrs: &[Attr]) {
        self.log(Level::Error, message, attrs);
    }
}

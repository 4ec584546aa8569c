//! Routes `tracing` events into the facade.
//!
//! Libraries the bots depend on log through `tracing`. Installing
//! [`FacadeLayer`] makes those events come out of the same handler, in the
//! same format, as the facade's own records.

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LogConfig;
use crate::global;
use crate::level::Level;
use crate::logger::Logger;
use crate::value::{Attr, Value};

/// Environment variable with a `tracing` filter directive, e.g.
/// `warn,serenity=info`.
pub const ENV_LOG_FILTER: &str = "LOG_FILTER";

/// A `tracing_subscriber` layer that re-emits events as facade records.
#[derive(Debug, Clone)]
pub struct FacadeLayer {
    target: Target,
}

#[derive(Debug, Clone)]
enum Target {
    /// Look up the process-wide logger for every event.
    Global,
    Fixed(Logger),
}

impl FacadeLayer {
    /// Emits through whatever the process-wide logger is at event time.
    #[must_use]
    pub const fn global() -> Self {
        Self {
            target: Target::Global,
        }
    }

    /// Emits through `logger`.
    #[must_use]
    pub const fn new(logger: Logger) -> Self {
        Self {
            target: Target::Fixed(logger),
        }
    }
}

impl<S: Subscriber> Layer<S> for FacadeLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = Level::from(*event.metadata().level());
        let current;
        let logger = match &self.target {
            Target::Global => {
                current = global::logger();
                &*current
            }
            Target::Fixed(logger) => logger,
        };
        if !logger.enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        logger.log(level, &visitor.message, &visitor.attrs);
    }
}

/// Collects the `message` field and every other field as an attribute.
#[derive(Default)]
struct FieldVisitor {
    message: String,
    attrs: Vec<Attr>,
}

impl FieldVisitor {
    fn push(&mut self, field: &Field, value: impl Into<Value>) {
        self.attrs.push(Attr::new(field.name(), value));
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.message);
        } else {
            self.push(field, value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, value);
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push(field, format!("{value:?}"));
        }
    }
}

/// Publishes `config` as the process-wide logger and routes `tracing`
/// events into it.
///
/// `LOG_FILTER` narrows which `tracing` events are forwarded; without it the
/// configured level is used. Uses `try_init()` so calling this more than
/// once (e.g. in tests) is safe.
pub fn init_tracing(config: &LogConfig) {
    config.init();

    let filter = EnvFilter::try_from_env(ENV_LOG_FILTER)
        .unwrap_or_else(|_| EnvFilter::new(config.effective_level().as_directive()));

    let _ = tracing_subscriber::registry()
        .with(FacadeLayer::global().with_filter(filter))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::LogFormat;
    use crate::test_support::TestWriter;

    fn capture_with(layer_logger: Logger, f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(FacadeLayer::new(layer_logger));
        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn forwards_message_and_fields() {
        let tw = TestWriter::new();
        let logger = Logger::with_writer(Level::Info, LogFormat::Json, tw.clone());
        capture_with(logger.with_component("gateway"), || {
            tracing::info!(shard = 3_u64, resumed = true, latency = 1.5, "Shard connected");
        });

        let lines = tw.json_lines();
        assert_eq!(lines.len(), 1);
        let rec = &lines[0];
        assert_eq!(rec["msg"], "Shard connected");
        assert_eq!(rec["level"], "INFO");
        assert_eq!(rec["component"], "gateway");
        assert_eq!(rec["shard"], 3);
        assert_eq!(rec["resumed"], true);
        assert_eq!(rec["latency"], 1.5);
    }

    #[test]
    fn maps_levels_and_filters() {
        let tw = TestWriter::new();
        let logger = Logger::with_writer(Level::Debug, LogFormat::Json, tw.clone());
        capture_with(logger, || {
            tracing::trace!("trace");
            tracing::debug!("debug");
            tracing::warn!("warn");
        });

        let levels: Vec<String> = tw
            .json_lines()
            .iter()
            .map(|l| l["level"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(levels, ["DEBUG", "DEBUG", "WARN"]);
    }

    #[test]
    fn below_threshold_is_dropped() {
        let tw = TestWriter::new();
        let logger = Logger::with_writer(Level::Warn, LogFormat::Text, tw.clone());
        capture_with(logger, || {
            tracing::info!(user_id = "u1", "ignored");
        });
        assert!(tw.contents().is_empty());
    }

    #[test]
    fn debug_and_error_fields() {
        let tw = TestWriter::new();
        let logger = Logger::with_writer(Level::Info, LogFormat::Json, tw.clone());
        let io = std::io::Error::other("socket closed");
        let err: &(dyn std::error::Error + 'static) = &io;
        capture_with(logger, || {
            tracing::error!(error = err, ids = ?[1, 2], "Gateway failed");
        });

        let rec = &tw.json_lines()[0];
        assert_eq!(rec["error"], "socket closed");
        assert_eq!(rec["ids"], "[1, 2]");
    }

    #[test]
    fn global_target_uses_published_logger() {
        let _guard = crate::global::tests::lock_global();
        let tw = crate::global::tests::capture(Level::Info, LogFormat::Text);
        let subscriber = tracing_subscriber::registry().with(FacadeLayer::global());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(command = "ping", "Command received");
        });
        let out = tw.contents();
        assert!(out.contains("msg=\"Command received\" command=ping"), "{out}");
    }
}

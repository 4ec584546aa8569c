//! Bot lifecycle and domain logging helpers.
//!
//! Fixed-shape records the bots emit often enough that every call site
//! should spell them the same way. All of these go through the process-wide
//! logger except [`log_error`], which logs on the handle it is given.

use std::error::Error;
use std::time::Duration;

use crate::attrs;
use crate::error::BotError;
use crate::global::{logger, with_component};
use crate::level::Level;
use crate::logger::Logger;
use crate::value::{Attr, Value};

/// Logs bot startup settings under `component=startup`.
pub fn log_startup(bot_name: &str, command_prefix: &str, log_level: &str, debug_mode: bool) {
    with_component("startup").info(
        "Bot starting up",
        &attrs![
            "bot_name" => bot_name,
            "command_prefix" => command_prefix,
            "log_level" => log_level,
            "debug_mode" => debug_mode,
        ],
    );
}

/// Logs shutdown completion under `component=shutdown`.
pub fn log_shutdown() {
    with_component("shutdown").info("Bot shutdown complete", &[]);
}

/// Logs one Discord command execution under `component=discord`.
pub fn log_discord_command(user_id: &str, username: &str, command: &str, success: bool) {
    with_component("discord").info(
        "Command executed",
        &attrs![
            "user_id" => user_id,
            "username" => username,
            "command" => command,
            "success" => success,
        ],
    );
}

/// Logs `err` at ERROR on `logger` with its description under `error`.
///
/// If a [`BotError`] is found anywhere in the source chain, its category,
/// message, status code, cause and context are attached as well.
pub fn log_error(logger: &Logger, err: &(dyn Error + 'static), message: &str) {
    let mut attrs = attrs!["error" => err.to_string()];
    if let Some(bot_err) = find_bot_error(err) {
        attrs.push(Attr::new("error_type", bot_err.kind.as_str()));
        attrs.push(Attr::new("error_message", bot_err.message.as_str()));
        if let Some(code) = bot_err.status_code {
            attrs.push(Attr::new("status_code", code));
        }
        if let Some(cause) = &bot_err.cause {
            attrs.push(Attr::new("cause", cause.to_string()));
        }
        attrs.extend(bot_err.context.iter().cloned());
    }
    logger.error(message, &attrs);
}

fn find_bot_error<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a BotError> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(found) = e.downcast_ref::<BotError>() {
            return Some(found);
        }
        current = e.source();
    }
    None
}

// ---------------------------------------------------------------------------
// Scoped loggers
// ---------------------------------------------------------------------------

/// Global logger tagged with a bot's name and type.
#[must_use]
pub fn with_bot(bot_name: &str, bot_type: &str) -> Logger {
    logger().with(attrs!["bot_name" => bot_name, "bot_type" => bot_type])
}

/// Global logger tagged with a Discord user.
#[must_use]
pub fn with_user(user_id: &str, username: &str) -> Logger {
    logger().with(attrs!["user_id" => user_id, "username" => username])
}

/// Global logger tagged with a command name.
#[must_use]
pub fn with_command(command: &str) -> Logger {
    logger().with(attrs!["command" => command])
}

/// Global logger tagged with an operation and its duration in milliseconds.
#[must_use]
pub fn with_duration(operation: &str, duration: Duration) -> Logger {
    logger().with(attrs!["operation" => operation, "duration_ms" => millis(duration)])
}

// ---------------------------------------------------------------------------
// Operational records
// ---------------------------------------------------------------------------

/// Logs a completed upstream API request at DEBUG, tagged with `service`.
pub fn log_api_request(service: &str, endpoint: &str, duration: Duration, success: bool) {
    with_component(service).debug(
        "API request completed",
        &attrs![
            "endpoint" => endpoint,
            "duration_ms" => millis(duration),
            "success" => success,
        ],
    );
}

/// Logs a cache lookup or write at DEBUG under `component=cache`.
pub fn log_cache_operation(operation: &str, key: &str, hit: bool, duration: Duration) {
    with_component("cache").debug(
        "Cache operation",
        &attrs![
            "operation" => operation,
            "key" => key,
            "hit" => hit,
            "duration_ns" => nanos(duration),
            "duration_ms" => millis(duration),
        ],
    );
}

/// Logs a measured value under `component=metrics`.
///
/// The measured component goes into `metric_component` so it does not
/// collide with the record's own component tag.
pub fn log_performance_metric(component: &str, metric: &str, value: impl Into<Value>, unit: &str) {
    with_component("metrics").info(
        "Performance metric",
        &attrs![
            "metric_component" => component,
            "metric" => metric,
            "value" => value,
            "unit" => unit,
        ],
    );
}

/// Logs a security event under `component=security`.
///
/// `critical` and `high` log at ERROR, `medium` and `warn` at WARN, anything
/// else at INFO.
pub fn log_security_event(event: &str, user_id: &str, reason: &str, severity: &str) {
    with_component("security").log(
        security_level(severity),
        "Security event",
        &attrs![
            "event" => event,
            "user_id" => user_id,
            "reason" => reason,
            "severity" => severity,
        ],
    );
}

fn security_level(severity: &str) -> Level {
    match severity.to_ascii_lowercase().as_str() {
        "critical" | "high" => Level::Error,
        "medium" | "warn" => Level::Warn,
        _ => Level::Info,
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

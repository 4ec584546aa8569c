//! Error types for `botlog`
//!
//! Logging itself never fails. The types here cover strict level parsing,
//! categorized bot errors that [`log_error`](crate::log_error) knows how to
//! unpack, and CLI failures.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::value::{Attr, Value};

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for the `botlog` binary.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// Usage error (malformed arguments)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Level Parsing
// ============================================================================

/// Returned by the strict `str::parse::<Level>()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level '{input}', expected one of DEBUG, INFO, WARN, ERROR")]
pub struct ParseLevelError {
    /// The rejected input.
    pub input: String,
}

// ============================================================================
// Categorized Bot Errors
// ============================================================================

/// Category of a [`BotError`], logged as `error_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Api,
    Config,
    Discord,
    Validation,
    NotFound,
    RateLimit,
    Network,
    Internal,
    Cache,
    Security,
    Database,
    Audio,
    Permission,
}

impl ErrorKind {
    /// Stable identifier used in records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api_error",
            Self::Config => "config_error",
            Self::Discord => "discord_error",
            Self::Validation => "validation_error",
            Self::NotFound => "not_found_error",
            Self::RateLimit => "rate_limit_error",
            Self::Network => "network_error",
            Self::Internal => "internal_error",
            Self::Cache => "cache_error",
            Self::Security => "security_error",
            Self::Database => "database_error",
            Self::Audio => "audio_error",
            Self::Permission => "permission_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An application error with a category and structured context.
///
/// When one of these appears anywhere in an error's source chain,
/// [`log_error`](crate::log_error) emits its category, message, status code,
/// cause and context as separate attributes.
///
/// ```
/// use botlog::{BotError, ErrorKind};
///
/// let err = BotError::new(ErrorKind::RateLimit, "slow down")
///     .with_status(429)
///     .with_context("retry_after_secs", 5);
/// assert_eq!(err.to_string(), "rate_limit_error: slow down");
/// ```
#[derive(Debug, Error)]
#[error("{kind}: {message}{}", .cause.as_ref().map_or_else(String::new, |c| format!(" (caused by: {c})")))]
pub struct BotError {
    /// Error category.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Underlying error, if any.
    #[source]
    pub cause: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    /// HTTP-style status code from an upstream API.
    pub status_code: Option<u16>,
    /// Extra attributes attached when the error is logged.
    pub context: Vec<Attr>,
}

impl BotError {
    /// Creates an error with no cause, status or context.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
            status_code: None,
            context: Vec::new(),
        }
    }

    /// Shorthand for an [`ErrorKind::Network`] error wrapping `cause`.
    #[must_use]
    pub fn network(
        message: impl Into<String>,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self::new(ErrorKind::Network, message).with_cause(cause)
    }

    /// Shorthand for an [`ErrorKind::Api`] error carrying a status code.
    #[must_use]
    pub fn api(message: impl Into<String>, status_code: u16) -> Self {
        Self::new(ErrorKind::Api, message).with_status(status_code)
    }

    /// Attaches an underlying cause.
    #[must_use]
    pub fn with_cause(
        mut self,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Attaches a status code.
    #[must_use]
    pub const fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Appends a context attribute.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.push(Attr::new(key.into(), value));
        self
    }
}

// ============================================================================
// CLI Errors
// ============================================================================

/// Failures of the `botlog` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// A `KEY=VALUE` argument was malformed.
    #[error("invalid attribute '{0}', expected KEY=VALUE")]
    InvalidAttr(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidAttr(_) => ExitCode::USAGE_ERROR,
        }
    }
}

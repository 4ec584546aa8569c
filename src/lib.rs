//! `botlog` - structured logging for Discord bots
//!
//! One process-wide logger writing text or JSON lines to stdout, level-tagged
//! emission functions, and fixed-shape records for bot lifecycle events.
//!
//! ```no_run
//! use botlog::attrs;
//!
//! botlog::initialize("debug", true);
//! botlog::log_startup("clippy", "!", "debug", true);
//!
//! let log = botlog::with_component("discord");
//! log.info("Connected", &attrs!["guilds" => 12]);
//!
//! botlog::log_discord_command("1234", "alice", "ping", true);
//! botlog::log_shutdown();
//! ```
//!
//! Components that can take a [`Logger`] directly should; the global
//! functions are for call sites that cannot.

pub mod bridge;
pub mod config;
pub mod error;
pub mod events;
pub mod global;
pub mod handler;
pub mod level;
pub mod logger;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(test)]
mod test_support;

pub use bridge::{FacadeLayer, init_tracing};
pub use config::LogConfig;
pub use error::{BotError, ErrorKind, ParseLevelError};
pub use events::{
    log_api_request, log_cache_operation, log_discord_command, log_error, log_performance_metric,
    log_security_event, log_shutdown, log_startup, with_bot, with_command, with_duration, with_user,
};
pub use global::{debug, error, info, initialize, logger, set_logger, warn, with_component};
pub use handler::{Handler, JsonHandler, LogFormat, Record, TextHandler};
pub use level::Level;
pub use logger::Logger;
pub use value::{Attr, Value};

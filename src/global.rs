//! Process-wide logger.
//!
//! Most code should hold a [`Logger`] and pass it along. For call sites that
//! cannot, this module keeps one shared handle:
//!
//! - [`initialize`] / [`set_logger`] build a handle and then publish it in a
//!   single atomic store, so readers never see a half-built logger.
//! - [`logger`] returns the current handle, creating the INFO/text default
//!   on first use if nothing was published yet.
//! - The free emission functions go through [`logger`].

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::handler::LogFormat;
use crate::level::Level;
use crate::logger::Logger;
use crate::value::{Attr, Value};

static GLOBAL: ArcSwapOption<Logger> = ArcSwapOption::const_empty();

/// Replaces the process-wide logger.
///
/// `level` is matched case-insensitively against DEBUG, INFO, WARN and
/// ERROR; anything else means INFO. `json_format` selects JSON lines over
/// text. Output goes to stdout. The last call wins.
pub fn initialize(level: &str, json_format: bool) {
    let logger = Logger::stdout(
        Level::parse_lenient(level),
        LogFormat::from_json_flag(json_format),
    );
    set_logger(logger);
}

/// Publishes an already-built logger as the process-wide handle.
pub fn set_logger(logger: Logger) {
    GLOBAL.store(Some(Arc::new(logger)));
}

/// Returns the process-wide logger, creating the default if needed.
///
/// When several threads race on first use, exactly one default is
/// published and all of them receive it.
#[must_use]
pub fn logger() -> Arc<Logger> {
    if let Some(current) = GLOBAL.load_full() {
        return current;
    }
    let fresh = Arc::new(Logger::default());
    let previous = GLOBAL.compare_and_swap(&None::<Arc<Logger>>, Some(Arc::clone(&fresh)));
    match &*previous {
        Some(winner) => Arc::clone(winner),
        None => fresh,
    }
}

/// Returns a logger derived from the global one that tags records with
/// `component`. The global handle itself is left untouched.
#[must_use]
pub fn with_component(component: impl Into<Value>) -> Logger {
    logger().with_component(component)
}

/// Emits a DEBUG record through the process-wide logger.
pub fn debug(message: &str, attrs: &[Attr]) {
    logger().debug(message, attrs);
}

/// Emits an INFO record through the process-wide logger.
pub fn info(message: &str, attrs: &[Attr]) {
    logger().info(message, attrs);
}

/// Emits a WARN record through the process-wide logger.
pub fn warn(message: &str, attrs: &[Attr]) {
    logger().warn(message, attrs);
}

/// Emits an ERROR record through the process-wide logger.
pub fn error(message: &str, attrs: &[Attr]) {
    logger().error(message, attrs);
}

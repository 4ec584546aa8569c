//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the facade.

use crate::cli::args::{Cli, CommandArgs, Commands, LogArgs, StartupArgs};
use crate::config::LogConfig;
use crate::error::CliError;
use crate::events::{log_discord_command, log_shutdown, log_startup};
use crate::global;
use crate::level::Level;
use crate::value::{Attr, Value};

/// Dispatch a parsed CLI invocation.
///
/// Settings come from `LOG_LEVEL`, `JSON_LOGGING` and `DEBUG` as read by
/// [`LogConfig::from_env`], with `--log-level` and `--json` taking
/// precedence. The process-wide logger is only initialized when the result
/// differs from the defaults; otherwise the INFO/text default is created on
/// first use.
///
/// # Errors
///
/// Returns an error if a `KEY=VALUE` attribute is malformed. Nothing is
/// emitted in that case.
pub fn dispatch(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli, LogConfig::from_env());
    if config != LogConfig::default() {
        config.init();
    }

    match cli.command {
        Commands::Log(args) => log(&args),
        Commands::Startup(args) => {
            startup(&args, &config);
            Ok(())
        }
        Commands::Shutdown => {
            log_shutdown();
            Ok(())
        }
        Commands::Command(args) => {
            command(&args);
            Ok(())
        }
    }
}

/// Applies the global flags on top of `base`.
#[must_use]
pub fn resolve_config(cli: &Cli, base: LogConfig) -> LogConfig {
    let mut config = base;
    if let Some(level) = cli.log_level.as_deref() {
        config.level = Level::parse_lenient(level);
    }
    if cli.json {
        config.json = true;
    }
    config
}

fn log(args: &LogArgs) -> Result<(), CliError> {
    let attrs = args
        .attrs
        .iter()
        .map(|raw| parse_attr(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let logger = global::logger();
    match &args.component {
        Some(component) => logger
            .with_component(component.as_str())
            .log(args.level, &args.message, &attrs),
        None => logger.log(args.level, &args.message, &attrs),
    }
    Ok(())
}

fn startup(args: &StartupArgs, config: &LogConfig) {
    log_startup(
        &args.bot_name,
        &args.prefix,
        config.effective_level().as_str(),
        args.debug_mode || config.debug_mode,
    );
}

fn command(args: &CommandArgs) {
    log_discord_command(&args.user_id, &args.username, &args.command, !args.failed);
}

/// Parses one `KEY=VALUE` argument.
///
/// # Errors
///
/// Returns [`CliError::InvalidAttr`] when there is no `=` or the key is
/// empty.
pub fn parse_attr(raw: &str) -> Result<Attr, CliError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok(Attr::new(key.to_owned(), parse_value(value))),
        _ => Err(CliError::InvalidAttr(raw.to_owned())),
    }
}

fn parse_value(raw: &str) -> Value {
    if let Ok(b) = raw.parse::<bool>() {
        return Value::Bool(b);
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::I64(n);
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Value::U64(n);
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::F64(n),
        _ => Value::String(raw.to_owned()),
    }
}

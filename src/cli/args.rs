//! CLI argument definitions
//!
//! All Clap derive structs for `botlog` command-line parsing.

use clap::{Args, Parser, Subcommand};

use crate::level::Level;

// ============================================================================
// Root CLI
// ============================================================================

/// Emit structured bot log records to stdout.
#[derive(Parser, Debug)]
#[command(name = "botlog", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Severity threshold; unknown values mean INFO. Overrides `LOG_LEVEL`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit JSON lines instead of text. Overrides `JSON_LOGGING`.
    #[arg(long, global = true)]
    pub json: bool,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Emit one record with optional KEY=VALUE attributes.
    Log(LogArgs),

    /// Emit the bot startup record.
    Startup(StartupArgs),

    /// Emit the bot shutdown record.
    Shutdown,

    /// Emit a Discord command execution record.
    Command(CommandArgs),
}

// ============================================================================
// Subcommand Arguments
// ============================================================================

/// Arguments for `log`.
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Record severity.
    #[arg(value_enum, ignore_case = true)]
    pub level: Level,

    /// Record message.
    pub message: String,

    /// Attributes as KEY=VALUE; values that look like booleans or numbers
    /// are typed accordingly.
    pub attrs: Vec<String>,

    /// Component tag for the record.
    #[arg(short, long)]
    pub component: Option<String>,
}

/// Arguments for `startup`.
#[derive(Args, Debug)]
pub struct StartupArgs {
    /// Bot name.
    #[arg(long, env = "BOT_NAME")]
    pub bot_name: String,

    /// Command prefix the bot listens for.
    #[arg(long, default_value = "!", env = "COMMAND_PREFIX")]
    pub prefix: String,

    /// Whether the bot runs in debug mode.
    #[arg(long)]
    pub debug_mode: bool,
}

/// Arguments for `command`.
#[derive(Args, Debug)]
pub struct CommandArgs {
    /// Discord user id.
    #[arg(long)]
    pub user_id: String,

    /// Discord username.
    #[arg(long)]
    pub username: String,

    /// Command name.
    #[arg(long)]
    pub command: String,

    /// Mark the command as failed.
    #[arg(long)]
    pub failed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_log_subcommand() {
        let cli = Cli::try_parse_from([
            "botlog", "--json", "log", "WARN", "disk low", "free_mb=12", "-c", "storage",
        ])
        .unwrap();
        assert!(cli.json);
        let Commands::Log(args) = cli.command else {
            panic!("expected log subcommand");
        };
        assert_eq!(args.level, Level::Warn);
        assert_eq!(args.message, "disk low");
        assert_eq!(args.attrs, ["free_mb=12"]);
        assert_eq!(args.component.as_deref(), Some("storage"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["botlog", "shutdown", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Commands::Shutdown));
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(Cli::try_parse_from(["botlog", "log", "loud", "msg"]).is_err());
    }
}

//! Shared integration-test harness for running the `botlog` binary and
//! collecting what it writes to stdout.

#![allow(dead_code)]

use std::process::{Command, Output};

use serde_json::Value;

/// Environment variables the binary reads; cleared so the host
/// environment cannot leak into assertions.
const CLEARED_ENV: [&str; 5] = [
    "LOG_LEVEL",
    "JSON_LOGGING",
    "DEBUG",
    "BOT_NAME",
    "COMMAND_PREFIX",
];

/// Result of one `botlog` invocation.
pub struct BotlogRun {
    pub output: Output,
}

impl BotlogRun {
    /// Runs `botlog` with `args` and a clean logging environment.
    #[allow(clippy::missing_panics_doc)]
    pub fn run(args: &[&str]) -> Self {
        Self::run_with_env(args, &[])
    }

    /// Runs `botlog` with `args` plus the given environment variables.
    #[allow(clippy::missing_panics_doc)]
    pub fn run_with_env(args: &[&str], env: &[(&str, &str)]) -> Self {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_botlog"));
        cmd.args(args);
        for key in CLEARED_ENV {
            cmd.env_remove(key);
        }
        for (key, value) in env {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("failed to spawn botlog");
        Self { output }
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Non-empty stdout lines.
    pub fn lines(&self) -> Vec<String> {
        self.stdout()
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Stdout lines parsed as JSON objects.
    #[allow(clippy::missing_panics_doc)]
    pub fn json_lines(&self) -> Vec<Value> {
        self.lines()
            .iter()
            .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("invalid JSON: {e}\nline: {l}")))
            .collect()
    }
}

/// Extracts the value of `key` from a text-format line.
///
/// Only handles unquoted values, which is all the assertions need.
pub fn text_field<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let prefix = format!("{key}=");
    line.split(' ').find_map(|part| part.strip_prefix(prefix.as_str()))
}

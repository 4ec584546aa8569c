//! `botlog` - emit structured bot log records from the command line

use clap::Parser;

use botlog::cli::args::Cli;
use botlog::cli::commands;
use botlog::error::ExitCode;

fn main() {
    let cli = Cli::parse();

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

//! `botlog` command-line interface
//!
//! Lets shell scripts and process supervisors emit records in the same
//! format as the bots themselves.

pub mod args;
pub mod commands;

//! Sorbent CLI library.
//!
//! Configuration, command execution, report export and output formatting for
//! the `sorbent` command-line tool.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod report;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;

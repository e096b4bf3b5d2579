//! CarbonTrace CLI library.
//!
//! Configuration, the local activity log, command execution and output
//! formatting for the `carbontrace` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ledger;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use ledger::Ledger;
pub use output::Formatter;

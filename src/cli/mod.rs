//! CLI module for tabula
//!
//! - serve: boot the HTTP server
//! - tables: one-shot table listing
//! - query: one-shot filtered/sorted table read

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{query, run, run_command, serve, tables};
pub use errors::{CliError, CliErrorCode, CliResult};

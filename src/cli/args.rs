//! CLI argument definitions using clap
//!
//! Commands:
//! - tabula serve [--config <path>] [--port <n>] [--data-dir <dir>]
//! - tabula tables --data-dir <dir>
//! - tabula query <table> --data-dir <dir> [--filter k=v]... [--sort-by token]...

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tabula - query a directory of CSV tables over HTTP
#[derive(Parser, Debug)]
#[command(name = "tabula")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,

        /// Override the configured table directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// List tables and their columns as JSON
    Tables {
        /// Directory holding the CSV tables
        #[arg(long, default_value = "resources")]
        data_dir: PathBuf,
    },

    /// Print the rows of one table as JSON
    Query {
        /// Table filename, with or without the .csv suffix
        table: String,

        /// Directory holding the CSV tables
        #[arg(long, default_value = "resources")]
        data_dir: PathBuf,

        /// Equality filter, `column=value` (repeatable)
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Sort token such as `dy_asc` (repeatable)
        #[arg(long = "sort-by")]
        sort_by: Vec<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

//! CLI command implementations

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::{CatalogError, TableCatalog};
use crate::file_storage::LocalBackend;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::Logger;
use crate::query::{Query, SortKey};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch one parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            config,
            port,
            data_dir,
        } => serve(config.as_deref(), port, data_dir),
        Command::Tables { data_dir } => tables(&data_dir),
        Command::Query {
            table,
            data_dir,
            filters,
            sort_by,
        } => query(&data_dir, &table, &filters, &sort_by),
    }
}

/// Boot the HTTP server.
///
/// Flags override values from the config file.
pub fn serve(config_path: Option<&Path>, port: Option<u16>, data_dir: Option<PathBuf>) -> CliResult<()> {
    let mut config = match config_path {
        Some(path) => HttpServerConfig::load(path)?,
        None => HttpServerConfig::default(),
    };
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir;
    }
    config.validate()?;

    Logger::set_min_severity(config.severity()?);

    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print every table with its columns
pub fn tables(data_dir: &Path) -> CliResult<()> {
    let catalog = TableCatalog::new(LocalBackend::new(data_dir));
    write_json(&catalog.list()?)
}

/// Print the rows of one table after filtering and sorting
pub fn query(data_dir: &Path, table: &str, filters: &[String], sort_by: &[String]) -> CliResult<()> {
    let catalog = TableCatalog::new(LocalBackend::new(data_dir));
    let loaded = catalog.load(table)?;
    let query = build_query(filters, sort_by)?;
    let rows = query.execute(loaded).map_err(CatalogError::from)?;
    write_json(&rows.into_records())
}

/// Turn `column=value` filters and sort tokens into a query
fn build_query(filters: &[String], sort_by: &[String]) -> CliResult<Query> {
    let mut query = Query::new();

    for filter in filters {
        let (column, value) = filter
            .split_once('=')
            .ok_or_else(|| CliError::usage(format!("filter must be column=value, got \"{}\"", filter)))?;
        query = query.filter(column, value);
    }

    for token in sort_by {
        let key = SortKey::parse(token).map_err(|e| CliError::usage(e.to_string()))?;
        query = query.sort_by(key);
    }

    Ok(query)
}

fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

//! tabula - an HTTP query service over a directory of CSV tables
//!
//! List tables, read one with equality filters and multi-key sorting,
//! upload and delete tables.

pub mod catalog;
pub mod cli;
pub mod file_storage;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod table;

//! # Table Catalog
//!
//! Orchestrates list/get/upload/delete: storage through a `BlobStore`,
//! parsing through the table loader, row selection through the query
//! engine.

pub mod errors;
pub mod service;

pub use errors::{CatalogError, CatalogResult};
pub use service::{overwrite_requested, resolve_filename, TableCatalog, TableSummary, TABLE_SUFFIX};

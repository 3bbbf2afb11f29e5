//! # Catalog Errors
//!
//! Request-facing error taxonomy of the table catalog.

use thiserror::Error;

use crate::file_storage::StorageError;
use crate::query::QueryError;
use crate::table::TableError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog errors
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// No table with this filename
    #[error("Table not found: {0}")]
    NotFound(String),

    /// Upload would replace an existing table without consent
    #[error("Table already exists: {0}")]
    Conflict(String),

    /// Upload filename missing or not a table file
    #[error("{0}")]
    InvalidFilename(String),

    /// Bad filter or sort request
    #[error("{0}")]
    Query(#[from] QueryError),

    /// Stored blob could not be parsed
    #[error("{0}")]
    Table(#[from] TableError),

    /// Storage failure
    #[error("{0}")]
    Storage(StorageError),
}

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ObjectNotFound(name) => CatalogError::NotFound(name),
            StorageError::InvalidPath(name) => {
                CatalogError::InvalidFilename(format!("invalid filename \"{}\"", name))
            }
            other => CatalogError::Storage(other),
        }
    }
}

impl CatalogError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::NotFound(_) => 404,
            CatalogError::Conflict(_) => 409,
            CatalogError::InvalidFilename(_) => 400,
            CatalogError::Query(_) => 400,
            CatalogError::Table(_) => 500,
            CatalogError::Storage(e) => e.status_code(),
        }
    }
}

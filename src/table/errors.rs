//! # Table Errors

use thiserror::Error;

/// Result type for table loading
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while turning a blob into a table
#[derive(Debug, Clone, Error)]
pub enum TableError {
    /// The blob is not well-formed delimited text
    #[error("Malformed table {table}: {reason}")]
    Malformed { table: String, reason: String },
}

impl TableError {
    pub fn malformed(table: impl Into<String>, reason: impl Into<String>) -> Self {
        TableError::Malformed {
            table: table.into(),
            reason: reason.into(),
        }
    }
}

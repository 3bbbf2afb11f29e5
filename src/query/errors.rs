//! # Query Errors

use thiserror::Error;

/// Result type for query evaluation
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors in a filter/sort request. Both are caller mistakes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Structurally invalid query (length mismatch, bad token, bad literal)
    #[error("{0}")]
    Malformed(String),

    /// Referenced column is not part of the table
    #[error("field \"{field}\" does not exist in file {table}")]
    UnknownColumn { field: String, table: String },
}

impl QueryError {
    pub fn unknown_column(field: impl Into<String>, table: impl Into<String>) -> Self {
        QueryError::UnknownColumn {
            field: field.into(),
            table: table.into(),
        }
    }
}

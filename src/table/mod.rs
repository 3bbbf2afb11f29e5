//! # Table Module
//!
//! In-memory representation of one CSV table:
//! - `loader` parses a blob into a `Table`
//! - `column` infers a type tag per column
//! - `value` holds the typed cells and row records

pub mod column;
pub mod errors;
pub mod loader;
pub mod value;

pub use column::{Column, ColumnType};
pub use errors::{TableError, TableResult};
pub use loader::{Table, TableLoader};
pub use value::{RowRecord, Scalar};

//! Observability for tabula
//!
//! Structured JSON logging plus begin/complete scopes for catalog
//! mutations.
//!
//! ```ignore
//! use tabula::observability::Logger;
//!
//! Logger::info("TABLE_GET", &[("table", "tornados.csv"), ("rows", "42")]);
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

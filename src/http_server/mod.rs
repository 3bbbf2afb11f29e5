//! # HTTP Server Module
//!
//! axum server exposing the table catalog.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/tables` - List and upload tables
//! - `/tables/:name` - Query and delete one table

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;
pub mod table_routes;

pub use config::{ConfigError, HttpServerConfig};
pub use errors::{ErrorResponse, HttpError, HttpResult};
pub use server::HttpServer;
pub use table_routes::{table_routes, TablesState};

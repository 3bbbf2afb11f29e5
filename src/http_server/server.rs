//! # HTTP Server
//!
//! Combines the table and health routers behind CORS and an upload
//! body limit.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::file_storage::{BlobStore, LocalBackend};
use crate::observability::Logger;

use super::config::HttpServerConfig;
use super::observability_routes::health_routes;
use super::table_routes::{table_routes, TablesState};

/// HTTP server for the table catalog
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Serve the tables found in `config.data_dir`
    pub fn with_config(config: HttpServerConfig) -> Self {
        let backend = LocalBackend::new(config.data_dir.clone());
        Self::with_backend(config, backend)
    }

    /// Serve the tables of an arbitrary blob store
    pub fn with_backend<B: BlobStore + 'static>(config: HttpServerConfig, backend: B) -> Self {
        let router = Self::build_router(&config, backend);
        Self { config, router }
    }

    fn build_router<B: BlobStore + 'static>(config: &HttpServerConfig, backend: B) -> Router {
        let tables_state = Arc::new(TablesState::new(backend));

        // No configured origins means permissive CORS
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(table_routes(tables_state))
            .layer(DefaultBodyLimit::max(config.max_upload_bytes))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("{}", e)))?;

        let listener = TcpListener::bind(addr).await?;

        let addr_str = addr.to_string();
        let data_dir = self.config.data_dir.display().to_string();
        Logger::info(
            "SERVER_STARTED",
            &[("addr", addr_str.as_str()), ("data_dir", data_dir.as_str())],
        );

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

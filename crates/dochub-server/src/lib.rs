//! HTTP server for DocHub.
//!
//! This crate exposes a loaded [`Site`] over a JSON API built on axum:
//! - Section listing for the landing page
//! - Per-section navigation trees
//! - Per-section page resolution with conditional requests
//! - Static-generation parameters per section
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use dochub_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let site = Arc::new(load_site());
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 3000,
//!         version: "0.1.0".to_owned(),
//!     };
//!
//!     run_server(config, site).await.unwrap();
//! }
//! ```
//!
//! # Routes
//!
//! ```text
//! GET /api/sections
//! GET /api/sections/{section}/navigation
//! GET /api/sections/{section}/pages
//! GET /api/sections/{section}/pages/{*slug}
//! GET /api/sections/{section}/params
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use dochub_site::Site;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Application version (for cache invalidation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            version: String::new(),
        }
    }
}

/// Run the server over a loaded site until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener fails.
pub async fn run_server(
    config: ServerConfig,
    site: Arc<Site>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        site,
        version: config.version,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from DocHub config.
#[must_use]
pub fn server_config_from_config(config: &dochub_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_from_config() {
        let config = dochub_config::Config::default();

        let server = server_config_from_config(&config, "1.2.3".to_owned());

        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 3000);
        assert_eq!(server.version, "1.2.3");
    }
}

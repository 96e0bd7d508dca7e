//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where the registry and the services on top
//! of it are wired together for the HTTP adapter.

use std::sync::Arc;

use anyhow::Result;
use mbean_harness_core::{CatService, InMemoryMBeanServer, MBeanServerPort};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 4567;

/// Default listen address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
}

impl ServerConfig {
    /// Create config with default host and port.
    pub fn with_defaults() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// `host:port` string suitable for binding.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Service mediating all registry access from handlers.
    pub cats: Arc<CatService>,
    /// The registry itself, kept for diagnostics and tests.
    pub server: Arc<dyn MBeanServerPort>,
}

/// Bootstrap the context around a fresh in-memory registry.
pub fn bootstrap() -> AxumContext {
    bootstrap_with(Arc::new(InMemoryMBeanServer::new()))
}

/// Bootstrap the context around an existing registry.
pub fn bootstrap_with(server: Arc<dyn MBeanServerPort>) -> AxumContext {
    let cats = Arc::new(CatService::new(Arc::clone(&server)));
    AxumContext { cats, server }
}

/// Start the control service and serve until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let app = crate::routes::create_router(bootstrap());

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("MBean harness listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("MBean harness shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
}

//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::core::JwtKeys;
use crate::services::HbnbFacade;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the HBnB HTTP application
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_facade(HbnbFacade::in_memory())
///     .with_jwt_keys(JwtKeys::new(b"secret", chrono::Duration::hours(48)))
///     .build()?;
/// ```
pub struct ServerBuilder {
    facade: Option<HbnbFacade>,
    keys: Option<Arc<JwtKeys>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            facade: None,
            keys: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the facade (required)
    pub fn with_facade(mut self, facade: HbnbFacade) -> Self {
        self.facade = Some(facade);
        self
    }

    /// Set the token keys (required)
    pub fn with_jwt_keys(mut self, keys: JwtKeys) -> Self {
        self.keys = Some(Arc::new(keys));
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for endpoints outside `/api/v1`, such as metrics scrapers or
    /// webhooks. Custom routes are stateless and merged after the API.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let facade = self
            .facade
            .take()
            .ok_or_else(|| anyhow::anyhow!("HbnbFacade is required. Call .with_facade()"))?;
        let keys = self
            .keys
            .take()
            .ok_or_else(|| anyhow::anyhow!("JwtKeys are required. Call .with_jwt_keys()"))?;

        Ok(ServerHost::new(facade, keys))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let host = self.build_host()?;
        RestExposure::build_router(host, self.custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

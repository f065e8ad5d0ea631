//! REST API handlers
//!
//! Handlers are thin: extract the caller and the payload, enforce the
//! per-route authorization policy, delegate to the facade and shape the
//! response. Every failure is an [`HbnbError`](crate::core::HbnbError).

pub mod v1;

use crate::server::ServerHost;
use axum::Router;

/// All versioned API routes
pub fn routes() -> Router<ServerHost> {
    Router::new().nest("/api/v1", v1::routes())
}

//! REST API exposure
//!
//! Consumes a `ServerHost` and produces an Axum `Router` carrying the
//! versioned API, health checks, request tracing and CORS.

use super::super::host::ServerHost;
use crate::api;
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a fully configured Axum router with:
    /// - Health check routes
    /// - `/api/v1` resource routes
    /// - Custom routes
    pub fn build_router(host: ServerHost, custom_routes: Vec<Router>) -> Result<Router> {
        let mut app = Self::health_routes()
            .merge(api::routes())
            .with_state(host);

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http()))
    }

    /// Build health check routes
    fn health_routes() -> Router<ServerHost> {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "hbnb"
        }))
    }
}

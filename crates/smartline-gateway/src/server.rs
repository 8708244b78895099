// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state. The gateway is a thin
//! adapter: handlers call straight into the shared [`TurnEngine`] and
//! serialize its replies.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use smartline_config::GatewayConfig;
use smartline_core::SmartlineError;
use smartline_dialog::TurnEngine;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The dialog engine shared with the other channels.
    pub engine: Arc<TurnEngine>,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

impl GatewayState {
    pub fn new(engine: Arc<TurnEngine>) -> Self {
        Self {
            engine,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Builds the gateway router. Split from [`start_server`] so tests can
/// drive it without binding a socket.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/v1/turns", post(handlers::post_turns))
        .route("/v1/customers/{id}", get(handlers::get_customer))
        .route("/v1/health", get(handlers::get_health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Binds to the configured address and serves until the process exits.
pub async fn start_server(
    config: &GatewayConfig,
    state: GatewayState,
) -> Result<(), SmartlineError> {
    let app = router(state);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener =
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| SmartlineError::Channel {
                message: format!("failed to bind gateway to {addr}: {e}"),
                source: Some(Box::new(e)),
            })?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| SmartlineError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

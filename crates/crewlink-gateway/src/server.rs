// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes and shared state for the REST surface and the WebSocket
//! endpoint.

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crewlink_chat::{RoomBus, RoomRegistry};
use crewlink_concierge::ConciergeSession;
use crewlink_core::{ChatStore, CrewlinkError};

use crate::handlers;
use crate::ws;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Durable chat store.
    pub store: Arc<dyn ChatStore + Send + Sync>,
    /// Room resolution.
    pub registry: Arc<RoomRegistry>,
    /// In-process fan-out.
    pub bus: Arc<RoomBus>,
    /// AI concierge side-channel.
    pub concierge: Arc<ConciergeSession>,
}

/// Gateway server configuration (mirrors GatewayConfig from crewlink-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the gateway router.
///
/// Routes:
/// - `GET /health` (unauthenticated liveness)
/// - `GET /v1/cities/{city}/rooms`, `POST /v1/cities/{city}/rooms`
/// - `GET /v1/rooms/{id}`
/// - `GET /ws` (auth during the handshake, not via middleware)
pub fn build_router(state: GatewayState) -> Router {
    let rest_routes = Router::new()
        .route("/health", get(handlers::get_public_health))
        .route(
            "/v1/cities/{city}/rooms",
            get(handlers::list_city_rooms).post(handlers::create_city_room),
        )
        .route("/v1/rooms/{id}", get(handlers::get_room))
        .with_state(state.clone());

    let ws_routes = Router::new()
        .route("/ws", get(ws::ws_handler))
        .with_state(state);

    Router::new()
        .merge(rest_routes)
        .merge(ws_routes)
        .layer(CorsLayer::permissive())
}

/// Bind and serve the gateway until the task is cancelled.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), CrewlinkError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CrewlinkError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| CrewlinkError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

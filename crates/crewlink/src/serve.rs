// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `crewlink serve` command implementation.
//!
//! Wires SQLite storage, the room registry, the broadcast bus, and the
//! concierge session (Anthropic-backed when a key is configured, the no-op
//! capability otherwise) into the gateway, then serves until ctrl-c.

use std::sync::Arc;

use tracing::info;

use crewlink_anthropic::AnthropicConcierge;
use crewlink_chat::{RoomBus, RoomRegistry};
use crewlink_concierge::{ConciergeSession, UnavailableConcierge};
use crewlink_config::CrewlinkConfig;
use crewlink_core::{ChatStore, ConciergeProvider, CrewlinkError, PluginAdapter};
use crewlink_gateway::{GatewayState, ServerConfig, start_server};
use crewlink_storage::SqliteStorage;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; the configured level is the fallback.
pub fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Runs the `crewlink serve` command.
pub async fn run_serve(config: CrewlinkConfig) -> Result<(), CrewlinkError> {
    info!("starting crewlink serve");

    // Storage.
    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;
    let store: Arc<dyn ChatStore + Send + Sync> = storage.clone();

    // Concierge capability: Anthropic when configured, no-op otherwise.
    let provider: Arc<dyn ConciergeProvider + Send + Sync> =
        if config.concierge.api_key.is_some() {
            let provider = AnthropicConcierge::new(&config.concierge)?;
            info!(model = %config.concierge.model, "anthropic concierge enabled");
            Arc::new(provider)
        } else {
            info!("concierge disabled (no api key configured)");
            Arc::new(UnavailableConcierge)
        };
    let concierge = Arc::new(ConciergeSession::new(provider, &config.concierge));

    let state = GatewayState {
        store: store.clone(),
        registry: Arc::new(RoomRegistry::new(store)),
        bus: Arc::new(RoomBus::new()),
        concierge,
    };

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    tokio::select! {
        result = start_server(&server_config, state) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    storage.shutdown().await?;
    info!("crewlink stopped");
    Ok(())
}

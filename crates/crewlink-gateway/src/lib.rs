// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP/WebSocket gateway for the Crewlink chat core.
//!
//! One axum server carries both surfaces: the real-time connection under
//! `/ws` (connection-authenticated, event-based) and the REST room
//! management routes under `/v1`. The gateway owns no domain logic; it
//! authenticates connections, then drives the chat registry, message
//! operations, broadcast bus, and concierge session.

pub mod auth;
pub mod events;
pub mod handlers;
pub mod server;
pub mod ws;

pub use events::{ClientEvent, ServerEvent};
pub use server::{GatewayState, ServerConfig, build_router, start_server};

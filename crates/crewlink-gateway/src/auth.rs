// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection authentication for the gateway.
//!
//! Token verification lives with the identity service; the chat core only
//! *decodes* the bearer token to bind a user id to the connection. A token
//! arrives either as the `token` query parameter of the WebSocket handshake
//! or as an `Authorization`-style header, with an optional `Bearer ` prefix
//! in both positions. No token or no usable `sub` claim is connection-fatal:
//! the handshake is rejected before any event handler runs.

use axum::http::HeaderMap;
use base64::Engine;
use serde::Deserialize;

/// Query parameters accepted on the WebSocket handshake.
#[derive(Debug, Deserialize)]
pub struct WsAuthQuery {
    /// Bearer token carried in the handshake.
    #[serde(default)]
    pub token: Option<String>,
}

/// JWT claims we care about.
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<String>,
}

/// Resolve the authenticated user id from the handshake, query token first.
pub fn authenticate(headers: &HeaderMap, query_token: Option<&str>) -> Option<String> {
    let token = query_token
        .map(str::to_string)
        .or_else(|| header_token(headers))?;
    decode_subject(&token)
}

fn header_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Decode (not verify) a JWT and return its non-empty `sub` claim.
pub fn decode_subject(raw: &str) -> Option<String> {
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    if token.is_empty() {
        return None;
    }
    let mut parts = token.split('.');
    let _header = parts.next()?;
    let payload = parts.next()?;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    claims.sub.filter(|sub| !sub.is_empty())
}

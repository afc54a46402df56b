// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Crewlink chat core.

use thiserror::Error;

/// The primary error type used across all Crewlink adapter traits and core operations.
///
/// Nothing in this taxonomy is fatal to the process: the worst-case outcome of
/// any single failing operation is that its caller sees an error event or an
/// error response.
#[derive(Debug, Error)]
pub enum CrewlinkError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Gateway transport errors (bind failure, serve failure, closed channels).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Concierge model backend errors (API failure, malformed response, transport error).
    #[error("concierge error: {message}")]
    Concierge {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The concierge capability is disabled or has no credentials configured.
    #[error("concierge capability is not configured")]
    ConciergeUnavailable,

    /// A referenced entity (user, room) does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Input rejected before any persistence took place.
    #[error("validation error: {0}")]
    Validation(String),

    /// A uniqueness constraint was hit on an explicit create.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Crewlink chat core.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// The closed set of room kinds.
///
/// Stored as text in the rooms table; all resolution logic keyed on this enum
/// lives in the room registry rather than at individual call sites.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomKind {
    /// Shared room for everyone laying over in a city.
    CityGroup,
    /// Two-party conversation keyed by the sorted pair of user ids.
    DirectMessage,
    /// Explicitly created group joined by room id.
    CustomGroup,
}

/// A chat room. Participants are tracked separately in `room_participants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Opaque id, generated on creation.
    pub id: String,
    /// Immutable once created.
    pub kind: RoomKind,
    /// Unique within its kind; settles duplicate-creation races at the store.
    pub resolution_key: String,
    /// Human label. Required for custom groups, derived for the others.
    pub display_name: Option<String>,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 last-update timestamp.
    pub updated_at: String,
}

/// A persisted chat message. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Opaque id.
    pub id: String,
    /// Owning room.
    pub room_id: String,
    /// Authenticated sender.
    pub sender_id: String,
    /// Non-empty text.
    pub content: String,
    /// Server-assigned ISO 8601 timestamp.
    pub created_at: String,
}

/// A known user. Identity issuance is external; the chat core only records
/// the ids it has seen so direct-message resolution can check existence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
    pub created_at: String,
}

/// Role of a single concierge conversation entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConversationRole {
    System,
    User,
    Assistant,
}

/// One entry in a concierge conversation window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: ConversationRole,
    pub content: String,
}

/// A request to the concierge model backend.
#[derive(Debug, Clone)]
pub struct ConciergeRequest {
    /// System context, prepended ahead of the conversation history.
    pub system: Option<String>,
    /// Conversation history plus the new user message, oldest first.
    pub messages: Vec<ConversationEntry>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

/// A response from the concierge model backend.
#[derive(Debug, Clone)]
pub struct ConciergeReply {
    /// Assistant text.
    pub content: String,
    /// Model that produced the reply.
    pub model: String,
    /// Stop reason reported by the backend, if any.
    pub stop_reason: Option<String>,
}

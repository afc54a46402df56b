// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire protocol for the real-time connection.
//!
//! Events are JSON objects tagged by an `event` field, with camelCase
//! payload keys. Example client frame:
//!
//! ```json
//! {"event": "joinCityRoom", "cityCode": "LHR"}
//! ```
//!
//! and the matching server frames:
//!
//! ```json
//! {"event": "joinedRoom", "status": "joined", "roomId": "..."}
//! {"event": "messageHistory", "roomId": "...", "messages": [...]}
//! ```

use serde::{Deserialize, Serialize};

use crewlink_core::types::ChatMessage;

/// Events a client may send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Join (and lazily create) the default crew room for a city.
    #[serde(rename_all = "camelCase")]
    JoinCityRoom { city_code: String },

    /// Join (and lazily create) the direct-message room with another user.
    #[serde(rename = "joinDMRoom", rename_all = "camelCase")]
    JoinDmRoom { other_user_id: String },

    /// Join a room the client already knows by id.
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String },

    /// Persist and broadcast a message to a room.
    #[serde(rename_all = "camelCase")]
    SendMessage { room_id: String, content: String },

    /// Route a message through the AI concierge for a topic.
    #[serde(rename = "sendAIMessage", rename_all = "camelCase")]
    SendAiMessage { topic_key: String, message: String },

    /// Drop the stored concierge conversation for a topic.
    #[serde(rename = "clearAIConversation", rename_all = "camelCase")]
    ClearAiConversation { topic_key: String },
}

/// Events the server sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Acknowledges a successful join.
    #[serde(rename_all = "camelCase")]
    JoinedRoom { status: String, room_id: String },

    /// History snapshot sent right after a join, oldest first. A distinct
    /// event, never mixed into the live stream.
    #[serde(rename_all = "camelCase")]
    MessageHistory {
        room_id: String,
        messages: Vec<ChatMessage>,
    },

    /// Live broadcast of a newly persisted message.
    #[serde(rename_all = "camelCase")]
    NewMessage { message: ChatMessage },

    /// Acknowledges the sender's own send.
    #[serde(rename_all = "camelCase")]
    MessageSent { status: String, message: ChatMessage },

    /// Concierge reply for a topic.
    #[serde(rename = "aiResponse", rename_all = "camelCase")]
    AiResponse { content: String, topic_key: String },

    /// Concierge failure or unavailability, user-facing text only.
    #[serde(rename = "aiError", rename_all = "camelCase")]
    AiError { error: String },

    /// Acknowledges a concierge conversation clear.
    #[serde(rename = "aiConversationCleared", rename_all = "camelCase")]
    AiConversationCleared { topic_key: String },

    /// Operation-level error scoped to the requesting connection.
    #[serde(rename_all = "camelCase")]
    Error { error: String },
}

impl ServerEvent {
    pub fn joined(room_id: &str) -> Self {
        Self::JoinedRoom {
            status: "joined".to_string(),
            room_id: room_id.to_string(),
        }
    }

    pub fn sent(message: ChatMessage) -> Self {
        Self::MessageSent {
            status: "sent".to_string(),
            message,
        }
    }
}

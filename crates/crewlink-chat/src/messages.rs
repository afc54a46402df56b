// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message append and history replay over the chat store.
//!
//! The store query is newest-first; the replay flow hands clients the
//! oldest-first order so a UI can append-render without reversing. That
//! reordering is part of the contract here, not an incidental detail.

use uuid::Uuid;

use crewlink_core::time::now_rfc3339;
use crewlink_core::types::ChatMessage;
use crewlink_core::{ChatStore, CrewlinkError};

/// Number of messages replayed to a connection when it joins a room.
pub const HISTORY_LIMIT: i64 = 50;

/// Validate, stamp, and persist a new message.
///
/// Rejects empty content before anything is written; the timestamp is
/// server-assigned.
pub async fn append(
    store: &dyn ChatStore,
    room_id: &str,
    sender_id: &str,
    content: &str,
) -> Result<ChatMessage, CrewlinkError> {
    if content.trim().is_empty() {
        return Err(CrewlinkError::Validation("message content must not be empty".into()));
    }
    if store.get_room(room_id).await?.is_none() {
        return Err(CrewlinkError::NotFound {
            entity: "room",
            id: room_id.to_string(),
        });
    }

    let message = ChatMessage {
        id: Uuid::new_v4().to_string(),
        room_id: room_id.to_string(),
        sender_id: sender_id.to_string(),
        content: content.to_string(),
        created_at: now_rfc3339(),
    };
    store.insert_message(&message).await?;
    Ok(message)
}

/// The most recent `limit` messages, oldest first, ready for replay.
pub async fn history_oldest_first(
    store: &dyn ChatStore,
    room_id: &str,
    limit: i64,
) -> Result<Vec<ChatMessage>, CrewlinkError> {
    let mut messages = store.recent_messages(room_id, limit).await?;
    messages.reverse();
    Ok(messages)
}

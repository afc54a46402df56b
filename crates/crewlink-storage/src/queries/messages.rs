// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message CRUD operations.

use crewlink_core::CrewlinkError;
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::models::ChatMessage;

/// Insert a new message.
pub async fn insert_message(db: &Database, msg: &ChatMessage) -> Result<(), CrewlinkError> {
    let msg = msg.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO messages (id, room_id, sender_id, content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![msg.id, msg.room_id, msg.sender_id, msg.content, msg.created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// The most recent `limit` messages of a room, **newest first**.
///
/// rowid breaks ties between same-millisecond inserts; it is monotone because
/// every write goes through the single serialized connection.
pub async fn recent_messages(
    db: &Database,
    room_id: &str,
    limit: i64,
) -> Result<Vec<ChatMessage>, CrewlinkError> {
    let room_id = room_id.to_string();
    db.connection()
        .call(move |conn| -> Result<Vec<ChatMessage>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, room_id, sender_id, content, created_at
                 FROM messages WHERE room_id = ?1
                 ORDER BY created_at DESC, rowid DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![room_id, limit], |row| {
                Ok(ChatMessage {
                    id: row.get(0)?,
                    room_id: row.get(1)?,
                    sender_id: row.get(2)?,
                    content: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
        .map_err(map_tr_err)
}

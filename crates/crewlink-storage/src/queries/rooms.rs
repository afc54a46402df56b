// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Room and participant CRUD operations.
//!
//! The `UNIQUE (kind, resolution_key)` constraint is the authority on room
//! identity within a kind: `find_or_create_room` rides it with an
//! insert-on-conflict-do-nothing followed by a fetch, and `create_room`
//! surfaces a collision as [`CrewlinkError::Conflict`].

use std::str::FromStr;

use crewlink_core::CrewlinkError;
use rusqlite::params;

use crate::database::{Database, is_constraint_violation, map_tr_err};
use crate::models::{Room, RoomKind};

fn room_from_row(row: &rusqlite::Row<'_>) -> Result<Room, rusqlite::Error> {
    let kind_str: String = row.get(1)?;
    let kind = RoomKind::from_str(&kind_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Room {
        id: row.get(0)?,
        kind,
        resolution_key: row.get(2)?,
        display_name: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

const ROOM_COLUMNS: &str = "id, kind, resolution_key, display_name, created_at, updated_at";

/// Insert a room unless its `(kind, resolution_key)` already exists, then
/// return the persisted row. Participants are added idempotently.
///
/// Run as a single call against the serialized connection, so concurrent
/// first-time resolutions of the same key all observe the same row.
pub async fn find_or_create_room(
    db: &Database,
    room: &Room,
    participants: &[String],
) -> Result<Room, CrewlinkError> {
    let room = room.clone();
    let participants = participants.to_vec();
    db.connection()
        .call(move |conn| -> Result<Room, rusqlite::Error> {
            conn.execute(
                "INSERT INTO rooms (id, kind, resolution_key, display_name, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT (kind, resolution_key) DO NOTHING",
                params![
                    room.id,
                    room.kind.to_string(),
                    room.resolution_key,
                    room.display_name,
                    room.created_at,
                    room.updated_at,
                ],
            )?;
            let persisted = conn.query_row(
                &format!(
                    "SELECT {ROOM_COLUMNS} FROM rooms WHERE kind = ?1 AND resolution_key = ?2"
                ),
                params![room.kind.to_string(), room.resolution_key],
                |row| room_from_row(row),
            )?;
            for user_id in &participants {
                conn.execute(
                    "INSERT OR IGNORE INTO room_participants (room_id, user_id, joined_at)
                     VALUES (?1, ?2, ?3)",
                    params![persisted.id, user_id, persisted.created_at],
                )?;
            }
            Ok(persisted)
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a new room, failing on a `(kind, resolution_key)` collision.
pub async fn create_room(
    db: &Database,
    room: &Room,
    participants: &[String],
) -> Result<(), CrewlinkError> {
    let room = room.clone();
    let participants = participants.to_vec();
    let key = room.resolution_key.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO rooms (id, kind, resolution_key, display_name, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    room.id,
                    room.kind.to_string(),
                    room.resolution_key,
                    room.display_name,
                    room.created_at,
                    room.updated_at,
                ],
            )?;
            for user_id in &participants {
                conn.execute(
                    "INSERT OR IGNORE INTO room_participants (room_id, user_id, joined_at)
                     VALUES (?1, ?2, ?3)",
                    params![room.id, user_id, room.created_at],
                )?;
            }
            Ok(())
        })
        .await
        .map_err(|e| {
            if is_constraint_violation(&e) {
                CrewlinkError::Conflict(format!("room already exists for key {key:?}"))
            } else {
                map_tr_err(e)
            }
        })
}

/// Get a room by id.
pub async fn get_room(db: &Database, id: &str) -> Result<Option<Room>, CrewlinkError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<Room>, rusqlite::Error> {
            let result = conn.query_row(
                &format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = ?1"),
                params![id],
                |row| room_from_row(row),
            );
            match result {
                Ok(room) => Ok(Some(room)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// List rooms of a kind whose resolution key starts with `prefix`, newest first.
pub async fn list_rooms_by_key_prefix(
    db: &Database,
    kind: RoomKind,
    prefix: &str,
) -> Result<Vec<Room>, CrewlinkError> {
    let prefix = prefix.to_string();
    db.connection()
        .call(move |conn| -> Result<Vec<Room>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ROOM_COLUMNS} FROM rooms
                 WHERE kind = ?1 AND resolution_key LIKE ?2 || '%'
                 ORDER BY created_at DESC, rowid DESC"
            ))?;
            let rows = stmt.query_map(params![kind.to_string(), prefix], |row| {
                room_from_row(row)
            })?;
            let mut rooms = Vec::new();
            for row in rows {
                rooms.push(row?);
            }
            Ok(rooms)
        })
        .await
        .map_err(map_tr_err)
}

/// Add a participant to a room. Idempotent.
pub async fn add_participant(
    db: &Database,
    room_id: &str,
    user_id: &str,
    joined_at: &str,
) -> Result<(), CrewlinkError> {
    let room_id = room_id.to_string();
    let user_id = user_id.to_string();
    let joined_at = joined_at.to_string();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT OR IGNORE INTO room_participants (room_id, user_id, joined_at)
                 VALUES (?1, ?2, ?3)",
                params![room_id, user_id, joined_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Participant user ids of a room, in join order.
pub async fn room_participants(
    db: &Database,
    room_id: &str,
) -> Result<Vec<String>, CrewlinkError> {
    let room_id = room_id.to_string();
    db.connection()
        .call(move |conn| -> Result<Vec<String>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT user_id FROM room_participants WHERE room_id = ?1 ORDER BY rowid",
            )?;
            let rows = stmt.query_map(params![room_id], |row| row.get(0))?;
            let mut users = Vec::new();
            for row in rows {
                users.push(row?);
            }
            Ok(users)
        })
        .await
        .map_err(map_tr_err)
}

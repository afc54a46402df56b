// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User CRUD operations.
//!
//! Identity issuance lives outside the chat core; these rows only record the
//! ids the gateway has seen so direct-message resolution can check existence.

use crewlink_core::CrewlinkError;
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::models::User;

/// Insert a user, or refresh the display name of an existing row.
pub async fn upsert_user(db: &Database, user: &User) -> Result<(), CrewlinkError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO users (id, display_name, created_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (id) DO UPDATE SET
                     display_name = COALESCE(excluded.display_name, users.display_name)",
                params![user.id, user.display_name, user.created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get a user by id.
pub async fn get_user(db: &Database, id: &str) -> Result<Option<User>, CrewlinkError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<User>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT id, display_name, created_at FROM users WHERE id = ?1",
                params![id],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        display_name: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            );
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

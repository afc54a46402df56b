// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All access is serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes; the
//! per-room message order depends on every insert passing through here.

use crewlink_core::CrewlinkError;
use tracing::debug;

use crate::migrations;

/// Handle to the single serialized SQLite connection.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path` in WAL mode, apply PRAGMAs,
    /// and run all pending migrations.
    pub async fn open(path: &str) -> Result<Self, CrewlinkError> {
        Self::open_with(path, true).await
    }

    /// Like [`Database::open`] with an explicit journal mode choice.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, CrewlinkError> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| CrewlinkError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| CrewlinkError::Storage {
                source: Box::new(e),
            })?;

        let journal_mode = if wal_mode { "WAL" } else { "DELETE" };
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch(&format!(
                "PRAGMA journal_mode = {journal_mode};
                 PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;"
            ))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| -> Result<(), rusqlite::Error> {
            migrations::run_migrations(conn)
                .map_err(|e| rusqlite::Error::ModuleError(e.to_string()))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// Returns the underlying serialized connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the background connection.
    pub async fn close(&self) -> Result<(), CrewlinkError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Map a tokio-rusqlite error into the workspace error type.
pub fn map_tr_err(err: tokio_rusqlite::Error) -> CrewlinkError {
    CrewlinkError::Storage {
        source: Box::new(err),
    }
}

/// True when the error is a SQLite uniqueness/constraint violation.
///
/// Used by the explicit room-create path to turn a `(kind, resolution_key)`
/// collision into a `Conflict` instead of an opaque storage error.
pub fn is_constraint_violation(err: &tokio_rusqlite::Error) -> bool {
    matches!(
        err,
        tokio_rusqlite::Error::Error(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_database_file() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("open.db");
        let _db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn open_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested/dirs/open.db");
        let _db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn migrations_create_schema() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("schema.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let tables: Vec<String> = db
            .connection()
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                )?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                let mut names = Vec::new();
                for row in rows {
                    names.push(row?);
                }
                Ok(names)
            })
            .await
            .unwrap();

        for expected in ["users", "rooms", "room_participants", "messages"] {
            assert!(
                tables.iter().any(|t| t == expected),
                "missing table {expected}, got {tables:?}"
            );
        }
    }

    #[tokio::test]
    async fn open_is_idempotent_across_restarts() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("reopen.db");
        {
            let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
            db.close().await.unwrap();
        }
        // Second open re-runs the migration runner against applied history.
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        db.close().await.unwrap();
    }
}

// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ChatStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use crewlink_config::model::StorageConfig;
use crewlink_core::types::{ChatMessage, Room, RoomKind, User};
use crewlink_core::{ChatStore, CrewlinkError, HealthStatus, PluginAdapter};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed chat store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`ChatStore::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`ChatStore::initialize`]
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, CrewlinkError> {
        self.db.get().ok_or_else(|| CrewlinkError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, CrewlinkError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CrewlinkError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl ChatStore for SqliteStorage {
    async fn initialize(&self) -> Result<(), CrewlinkError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| CrewlinkError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), CrewlinkError> {
        self.db()?.close().await
    }

    // --- Room operations ---

    async fn find_or_create_room(
        &self,
        room: &Room,
        participants: &[String],
    ) -> Result<Room, CrewlinkError> {
        queries::rooms::find_or_create_room(self.db()?, room, participants).await
    }

    async fn create_room(
        &self,
        room: &Room,
        participants: &[String],
    ) -> Result<(), CrewlinkError> {
        queries::rooms::create_room(self.db()?, room, participants).await
    }

    async fn get_room(&self, id: &str) -> Result<Option<Room>, CrewlinkError> {
        queries::rooms::get_room(self.db()?, id).await
    }

    async fn list_rooms_by_key_prefix(
        &self,
        kind: RoomKind,
        prefix: &str,
    ) -> Result<Vec<Room>, CrewlinkError> {
        queries::rooms::list_rooms_by_key_prefix(self.db()?, kind, prefix).await
    }

    async fn add_participant(&self, room_id: &str, user_id: &str) -> Result<(), CrewlinkError> {
        let joined_at = crewlink_core::time::now_rfc3339();
        queries::rooms::add_participant(self.db()?, room_id, user_id, &joined_at).await
    }

    async fn room_participants(&self, room_id: &str) -> Result<Vec<String>, CrewlinkError> {
        queries::rooms::room_participants(self.db()?, room_id).await
    }

    // --- Message operations ---

    async fn insert_message(&self, message: &ChatMessage) -> Result<(), CrewlinkError> {
        queries::messages::insert_message(self.db()?, message).await
    }

    async fn recent_messages(
        &self,
        room_id: &str,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, CrewlinkError> {
        queries::messages::recent_messages(self.db()?, room_id, limit).await
    }

    // --- User operations ---

    async fn upsert_user(&self, user: &User) -> Result<(), CrewlinkError> {
        queries::users::upsert_user(self.db()?, user).await
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, CrewlinkError> {
        queries::users::get_user(self.db()?, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    fn make_room(id: &str, kind: RoomKind, key: &str) -> Room {
        Room {
            id: id.to_string(),
            kind,
            resolution_key: key.to_string(),
            display_name: None,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            updated_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn sqlite_storage_implements_plugin_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("adapter.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        assert_eq!(storage.name(), "sqlite");
        assert_eq!(storage.version(), semver::Version::new(0, 1, 0));
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        assert!(storage.initialize().await.is_err());
    }

    #[tokio::test]
    async fn health_check_fails_when_not_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        assert!(storage.health_check().await.is_err());
    }

    #[tokio::test]
    async fn health_check_returns_healthy_when_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("health.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn full_room_lifecycle_through_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("lifecycle.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        storage.initialize().await.unwrap();

        // Seed users.
        for id in ["alice", "bob"] {
            storage
                .upsert_user(&User {
                    id: id.to_string(),
                    display_name: None,
                    created_at: "2026-01-01T00:00:00.000Z".to_string(),
                })
                .await
                .unwrap();
        }

        // Resolve a DM room with both participants.
        let dm = make_room("dm-1", RoomKind::DirectMessage, "alice:bob");
        let room = storage
            .find_or_create_room(&dm, &["alice".into(), "bob".into()])
            .await
            .unwrap();
        assert_eq!(room.id, "dm-1");
        assert_eq!(
            storage.room_participants("dm-1").await.unwrap(),
            vec!["alice".to_string(), "bob".to_string()]
        );

        // Persist and read back messages.
        let msg = ChatMessage {
            id: "m1".to_string(),
            room_id: "dm-1".to_string(),
            sender_id: "alice".to_string(),
            content: "hello".to_string(),
            created_at: "2026-01-01T00:00:01.000Z".to_string(),
        };
        storage.insert_message(&msg).await.unwrap();
        let messages = storage.recent_messages("dm-1", 50).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "hello");

        storage.close().await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_runs_checkpoint() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("shutdown.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        storage.initialize().await.unwrap();

        storage
            .create_room(&make_room("r1", RoomKind::CityGroup, "LHR#LHR Crew Chat"), &[])
            .await
            .unwrap();

        storage.shutdown().await.unwrap();
    }
}

// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Room resolution: one place that knows how a join request maps to a room.
//!
//! Every room kind resolves through a deterministic key:
//! - city groups: `"{CITY}#{display name}"` (the join flow targets the fixed
//!   default name, the REST create path a caller-supplied one)
//! - direct messages: the two user ids sorted and joined with `:`
//! - custom groups: the literal room id, no implicit creation
//!
//! First-time resolution races are settled by the store's
//! `UNIQUE (kind, resolution_key)` constraint, not by application logic.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crewlink_core::time::now_rfc3339;
use crewlink_core::types::{Room, RoomKind};
use crewlink_core::{ChatStore, CrewlinkError};

/// Separator between the two sorted user ids in a direct-message key.
const DM_KEY_SEPARATOR: &str = ":";

/// Separator between city code and room name in a city-group key.
const CITY_KEY_SEPARATOR: &str = "#";

/// Display name of the default room every crew member lands in for a city.
pub fn default_city_room_name(city_code: &str) -> String {
    format!("{city_code} Crew Chat")
}

/// Deterministic key for a direct-message pair, independent of argument order.
pub fn dm_key(user_a: &str, user_b: &str) -> String {
    let (lo, hi) = if user_a <= user_b {
        (user_a, user_b)
    } else {
        (user_b, user_a)
    };
    format!("{lo}{DM_KEY_SEPARATOR}{hi}")
}

fn city_key(city_code: &str, name: &str) -> String {
    format!("{city_code}{CITY_KEY_SEPARATOR}{name}")
}

fn normalize_city(city_code: &str) -> Result<String, CrewlinkError> {
    let city = city_code.trim().to_uppercase();
    if city.is_empty() {
        return Err(CrewlinkError::Validation("city code must not be empty".into()));
    }
    Ok(city)
}

fn new_room(kind: RoomKind, resolution_key: String, display_name: Option<String>) -> Room {
    let now = now_rfc3339();
    Room {
        id: Uuid::new_v4().to_string(),
        kind,
        resolution_key,
        display_name,
        created_at: now.clone(),
        updated_at: now,
    }
}

/// Resolves join requests to persisted rooms, creating them on first reference.
pub struct RoomRegistry {
    store: Arc<dyn ChatStore + Send + Sync>,
}

impl RoomRegistry {
    pub fn new(store: Arc<dyn ChatStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Lookup-or-create the default city room for `city_code`.
    ///
    /// Used by the real-time join flow. Idempotent: concurrent first joins of
    /// the same city all observe the same room id.
    pub async fn resolve_city(&self, city_code: &str) -> Result<Room, CrewlinkError> {
        let city = normalize_city(city_code)?;
        let name = default_city_room_name(&city);
        let candidate = new_room(
            RoomKind::CityGroup,
            city_key(&city, &name),
            Some(name),
        );
        let room = self.store.find_or_create_room(&candidate, &[]).await?;
        debug!(city = %city, room_id = %room.id, "resolved city room");
        Ok(room)
    }

    /// Create a new named city-group room, seeding the creator as participant.
    ///
    /// Used by the REST surface. A second room with the same name for the
    /// same city is a [`CrewlinkError::Conflict`].
    pub async fn create_city_room(
        &self,
        city_code: &str,
        name: &str,
        creator_id: &str,
    ) -> Result<Room, CrewlinkError> {
        let city = normalize_city(city_code)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CrewlinkError::Validation("room name must not be empty".into()));
        }
        let room = new_room(
            RoomKind::CityGroup,
            city_key(&city, name),
            Some(name.to_string()),
        );
        self.store
            .create_room(&room, &[creator_id.to_string()])
            .await?;
        debug!(city = %city, room_id = %room.id, name, "created named city room");
        Ok(room)
    }

    /// Lookup-or-create the direct-message room between two users.
    ///
    /// Both users must already be known; the room is created with both as
    /// participants. Argument order is irrelevant.
    pub async fn resolve_dm(&self, user_a: &str, user_b: &str) -> Result<Room, CrewlinkError> {
        if user_a == user_b {
            return Err(CrewlinkError::Validation(
                "cannot open a direct message with yourself".into(),
            ));
        }
        for user in [user_a, user_b] {
            if self.store.get_user(user).await?.is_none() {
                return Err(CrewlinkError::NotFound {
                    entity: "user",
                    id: user.to_string(),
                });
            }
        }
        let candidate = new_room(RoomKind::DirectMessage, dm_key(user_a, user_b), None);
        let room = self
            .store
            .find_or_create_room(&candidate, &[user_a.to_string(), user_b.to_string()])
            .await?;
        debug!(room_id = %room.id, "resolved direct-message room");
        Ok(room)
    }

    /// Resolve a room the caller already knows by id. No implicit creation.
    ///
    /// Joining a custom group this way durably adds the caller as a
    /// participant; city and DM rooms keep their seeded membership and the
    /// join stays a transport-level subscription.
    pub async fn resolve_existing(
        &self,
        room_id: &str,
        joiner_id: &str,
    ) -> Result<Room, CrewlinkError> {
        let room = self
            .store
            .get_room(room_id)
            .await?
            .ok_or_else(|| CrewlinkError::NotFound {
                entity: "room",
                id: room_id.to_string(),
            })?;
        if room.kind == RoomKind::CustomGroup {
            self.store.add_participant(&room.id, joiner_id).await?;
        }
        Ok(room)
    }

    /// All city-group rooms for a city, newest first.
    pub async fn list_city_rooms(&self, city_code: &str) -> Result<Vec<Room>, CrewlinkError> {
        let city = normalize_city(city_code)?;
        self.store
            .list_rooms_by_key_prefix(RoomKind::CityGroup, &format!("{city}{CITY_KEY_SEPARATOR}"))
            .await
    }

    /// Room with its participant list, for the REST detail view.
    pub async fn room_with_participants(
        &self,
        room_id: &str,
    ) -> Result<(Room, Vec<String>), CrewlinkError> {
        let room = self
            .store
            .get_room(room_id)
            .await?
            .ok_or_else(|| CrewlinkError::NotFound {
                entity: "room",
                id: room_id.to_string(),
            })?;
        let participants = self.store.room_participants(&room.id).await?;
        Ok((room, participants))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewlink_config::model::StorageConfig;
    use crewlink_core::types::User;
    use crewlink_storage::SqliteStorage;
    use tempfile::tempdir;

    async fn setup_registry() -> (RoomRegistry, Arc<SqliteStorage>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("registry.db");
        let storage = Arc::new(SqliteStorage::new(StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
        }));
        storage.initialize().await.unwrap();
        (RoomRegistry::new(storage.clone()), storage, dir)
    }

    async fn seed_user(storage: &SqliteStorage, id: &str) {
        storage
            .upsert_user(&User {
                id: id.to_string(),
                display_name: None,
                created_at: now_rfc3339(),
            })
            .await
            .unwrap();
    }

    #[test]
    fn dm_key_is_symmetric() {
        assert_eq!(dm_key("alice", "bob"), dm_key("bob", "alice"));
        assert_eq!(dm_key("alice", "bob"), "alice:bob");
    }

    #[tokio::test]
    async fn resolve_city_creates_then_reuses() {
        let (registry, _storage, _dir) = setup_registry().await;

        let first = registry.resolve_city("lhr").await.unwrap();
        assert_eq!(first.kind, RoomKind::CityGroup);
        assert_eq!(first.display_name.as_deref(), Some("LHR Crew Chat"));
        assert_eq!(first.resolution_key, "LHR#LHR Crew Chat");

        let second = registry.resolve_city("LHR").await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn resolve_city_rejects_empty_code() {
        let (registry, _storage, _dir) = setup_registry().await;
        let err = registry.resolve_city("  ").await.unwrap_err();
        assert!(matches!(err, CrewlinkError::Validation(_)));
    }

    #[tokio::test]
    async fn concurrent_city_resolution_yields_one_room() {
        let (registry, _storage, _dir) = setup_registry().await;
        let registry = Arc::new(registry);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                registry.resolve_city("JFK").await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.dedup();
        assert_eq!(ids.len(), 1, "all resolvers must observe the same room");
    }

    #[tokio::test]
    async fn dm_resolution_is_order_independent() {
        let (registry, storage, _dir) = setup_registry().await;
        seed_user(&storage, "alice").await;
        seed_user(&storage, "bob").await;

        let ab = registry.resolve_dm("alice", "bob").await.unwrap();
        let ba = registry.resolve_dm("bob", "alice").await.unwrap();
        assert_eq!(ab.id, ba.id);
        assert_eq!(ab.kind, RoomKind::DirectMessage);
        assert!(ab.display_name.is_none());

        let participants = storage.room_participants(&ab.id).await.unwrap();
        assert_eq!(participants.len(), 2);
        assert!(participants.contains(&"alice".to_string()));
        assert!(participants.contains(&"bob".to_string()));
    }

    #[tokio::test]
    async fn dm_with_unknown_partner_is_not_found() {
        let (registry, storage, _dir) = setup_registry().await;
        seed_user(&storage, "alice").await;

        let err = registry.resolve_dm("alice", "ghost").await.unwrap_err();
        match err {
            CrewlinkError::NotFound { entity, id } => {
                assert_eq!(entity, "user");
                assert_eq!(id, "ghost");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn dm_with_self_is_rejected() {
        let (registry, storage, _dir) = setup_registry().await;
        seed_user(&storage, "alice").await;
        let err = registry.resolve_dm("alice", "alice").await.unwrap_err();
        assert!(matches!(err, CrewlinkError::Validation(_)));
    }

    #[tokio::test]
    async fn create_city_room_conflicts_on_reused_name() {
        let (registry, _storage, _dir) = setup_registry().await;

        let room = registry
            .create_city_room("LHR", "Night Owls", "alice")
            .await
            .unwrap();
        assert_eq!(room.display_name.as_deref(), Some("Night Owls"));

        let err = registry
            .create_city_room("lhr", "Night Owls", "bob")
            .await
            .unwrap_err();
        assert!(matches!(err, CrewlinkError::Conflict(_)));
    }

    #[tokio::test]
    async fn named_room_does_not_collide_with_default_room() {
        let (registry, _storage, _dir) = setup_registry().await;

        let default = registry.resolve_city("LHR").await.unwrap();
        let named = registry
            .create_city_room("LHR", "Night Owls", "alice")
            .await
            .unwrap();
        assert_ne!(default.id, named.id);

        let rooms = registry.list_city_rooms("LHR").await.unwrap();
        assert_eq!(rooms.len(), 2);
    }

    #[tokio::test]
    async fn resolve_existing_requires_known_id() {
        let (registry, _storage, _dir) = setup_registry().await;
        let err = registry.resolve_existing("missing", "alice").await.unwrap_err();
        assert!(matches!(err, CrewlinkError::NotFound { entity: "room", .. }));
    }

    #[tokio::test]
    async fn joining_custom_room_adds_participant() {
        let (registry, storage, _dir) = setup_registry().await;

        let room = Room {
            id: "custom-1".to_string(),
            kind: RoomKind::CustomGroup,
            resolution_key: "custom-1".to_string(),
            display_name: Some("Flight Deck".to_string()),
            created_at: now_rfc3339(),
            updated_at: now_rfc3339(),
        };
        storage.create_room(&room, &[]).await.unwrap();

        registry.resolve_existing("custom-1", "carol").await.unwrap();
        registry.resolve_existing("custom-1", "carol").await.unwrap();

        let participants = storage.room_participants("custom-1").await.unwrap();
        assert_eq!(participants, vec!["carol".to_string()]);
    }

    #[tokio::test]
    async fn joining_city_room_by_id_does_not_grow_participants() {
        let (registry, storage, _dir) = setup_registry().await;
        let room = registry.resolve_city("LHR").await.unwrap();

        registry.resolve_existing(&room.id, "carol").await.unwrap();
        let participants = storage.room_participants(&room.id).await.unwrap();
        assert!(participants.is_empty());
    }
}

// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for the chat persistence backend.

use async_trait::async_trait;

use crate::error::CrewlinkError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChatMessage, Room, RoomKind, User};

/// Adapter for the durable chat store.
///
/// The store owns the relational schema for rooms, participants, messages,
/// and users. Room uniqueness per `(kind, resolution_key)` is enforced here,
/// at the store, so concurrent creation attempts from multiple connections
/// settle on a single persisted row.
#[async_trait]
pub trait ChatStore: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, PRAGMAs).
    async fn initialize(&self) -> Result<(), CrewlinkError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), CrewlinkError>;

    // --- Room operations ---

    /// Inserts the room if no row exists for its `(kind, resolution_key)`,
    /// then returns the persisted row (freshly inserted or pre-existing).
    /// Participants are added idempotently in the same round-trip.
    async fn find_or_create_room(
        &self,
        room: &Room,
        participants: &[String],
    ) -> Result<Room, CrewlinkError>;

    /// Inserts a new room, failing with [`CrewlinkError::Conflict`] when a
    /// row already holds the same `(kind, resolution_key)`.
    async fn create_room(
        &self,
        room: &Room,
        participants: &[String],
    ) -> Result<(), CrewlinkError>;

    /// Fetches a room by id.
    async fn get_room(&self, id: &str) -> Result<Option<Room>, CrewlinkError>;

    /// Lists rooms of a kind whose resolution key starts with the prefix,
    /// newest first.
    async fn list_rooms_by_key_prefix(
        &self,
        kind: RoomKind,
        prefix: &str,
    ) -> Result<Vec<Room>, CrewlinkError>;

    /// Adds a participant to a room. Idempotent.
    async fn add_participant(&self, room_id: &str, user_id: &str) -> Result<(), CrewlinkError>;

    /// Returns the participant user ids of a room.
    async fn room_participants(&self, room_id: &str) -> Result<Vec<String>, CrewlinkError>;

    // --- Message operations ---

    /// Persists a message.
    async fn insert_message(&self, message: &ChatMessage) -> Result<(), CrewlinkError>;

    /// Returns the most recent `limit` messages of a room, **newest first**.
    /// Callers that replay history to a client must reverse into oldest-first
    /// order themselves.
    async fn recent_messages(
        &self,
        room_id: &str,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, CrewlinkError>;

    // --- User operations ---

    /// Inserts or refreshes a user row.
    async fn upsert_user(&self, user: &User) -> Result<(), CrewlinkError>;

    /// Fetches a user by id.
    async fn get_user(&self, id: &str) -> Result<Option<User>, CrewlinkError>;
}

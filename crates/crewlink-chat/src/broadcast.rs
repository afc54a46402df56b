// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process fan-out of room events to live connections.
//!
//! Each connection registers an outbound sender; rooms hold the set of
//! currently subscribed connections. Delivery is best-effort and strictly
//! in-process: a connection that is not subscribed when a message is
//! published catches up through the next history replay. Horizontal scaling
//! would put an external pub/sub behind [`RoomBus::publish`]; a single
//! instance does not need one.

use std::collections::HashSet;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;

/// Capacity of each connection's outbound queue.
const OUTBOUND_BUFFER: usize = 64;

/// Create an outbound channel sized for one connection.
pub fn outbound_channel() -> (mpsc::Sender<String>, mpsc::Receiver<String>) {
    mpsc::channel(OUTBOUND_BUFFER)
}

/// Connection registry and per-room subscription state.
#[derive(Default)]
pub struct RoomBus {
    /// conn_id -> outbound sender for that connection.
    senders: DashMap<String, mpsc::Sender<String>>,
    /// room_id -> subscribed conn_ids.
    rooms: DashMap<String, HashSet<String>>,
    /// conn_id -> rooms it is subscribed to, for disconnect cleanup.
    joined: DashMap<String, HashSet<String>>,
}

impl RoomBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection's outbound sender.
    pub fn register(&self, conn_id: &str, sender: mpsc::Sender<String>) {
        self.senders.insert(conn_id.to_string(), sender);
    }

    /// Release all state held for a connection.
    pub fn unregister(&self, conn_id: &str) {
        self.senders.remove(conn_id);
        if let Some((_, rooms)) = self.joined.remove(conn_id) {
            for room_id in rooms {
                if let Some(mut subscribers) = self.rooms.get_mut(&room_id) {
                    subscribers.remove(conn_id);
                }
            }
        }
        debug!(conn_id, "connection unregistered");
    }

    /// Subscribe a connection to a room. Idempotent: returns `false` when the
    /// subscription already existed, and a repeated join never duplicates
    /// delivery.
    pub fn join(&self, conn_id: &str, room_id: &str) -> bool {
        let newly_joined = self
            .rooms
            .entry(room_id.to_string())
            .or_default()
            .insert(conn_id.to_string());
        self.joined
            .entry(conn_id.to_string())
            .or_default()
            .insert(room_id.to_string());
        newly_joined
    }

    /// Number of connections currently subscribed to a room.
    pub fn subscriber_count(&self, room_id: &str) -> usize {
        self.rooms.get(room_id).map_or(0, |s| s.len())
    }

    /// Deliver a payload to every connection currently subscribed to the
    /// room, the publisher's own connection included. Returns the number of
    /// connections the payload was handed to.
    pub async fn publish(&self, room_id: &str, payload: &str) -> usize {
        // Snapshot the recipients before awaiting so no map guard is held
        // across a suspension point.
        let recipients: Vec<mpsc::Sender<String>> = match self.rooms.get(room_id) {
            Some(subscribers) => subscribers
                .iter()
                .filter_map(|conn_id| self.senders.get(conn_id).map(|s| s.clone()))
                .collect(),
            None => return 0,
        };

        let mut delivered = 0;
        for sender in recipients {
            // A closed or full receiver means the connection is going away;
            // it will catch up from history on its next join.
            if sender.send(payload.to_string()).await.is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    /// Deliver a payload to a single connection.
    pub async fn send_to(&self, conn_id: &str, payload: &str) {
        let sender = self.senders.get(conn_id).map(|s| s.clone());
        if let Some(sender) = sender {
            let _ = sender.send(payload.to_string()).await;
        }
    }
}

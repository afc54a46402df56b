// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat domain logic for Crewlink: room resolution, message append/history,
//! and in-process broadcast fan-out.
//!
//! The gateway crate drives these pieces from its WebSocket event loop; they
//! stay transport-agnostic so the REST surface and tests can use them too.

pub mod broadcast;
pub mod messages;
pub mod registry;

pub use broadcast::{RoomBus, outbound_channel};
pub use messages::HISTORY_LIMIT;
pub use registry::RoomRegistry;

// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Crewlink chat core.
//!
//! Rooms, participants, messages, and users live here behind the
//! [`crewlink_core::ChatStore`] trait. All access is serialized through a
//! single tokio-rusqlite background connection; schema changes are embedded
//! refinery migrations.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;

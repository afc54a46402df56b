// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per entity.

pub mod messages;
pub mod rooms;
pub mod users;

// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Crewlink chat core.
//!
//! This crate provides the foundational trait definitions, error type, and
//! domain types used throughout the Crewlink workspace. Backend adapters
//! (storage, concierge provider) implement traits defined here.

pub mod error;
pub mod time;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::CrewlinkError;
pub use types::{ChatMessage, HealthStatus, Room, RoomKind, User};

// Re-export adapter traits at crate root.
pub use traits::{ChatStore, ConciergeProvider, PluginAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crewlink_error_has_all_variants() {
        let _config = CrewlinkError::Config("test".into());
        let _storage = CrewlinkError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _channel = CrewlinkError::Channel {
            message: "test".into(),
            source: None,
        };
        let _concierge = CrewlinkError::Concierge {
            message: "test".into(),
            source: None,
        };
        let _unavailable = CrewlinkError::ConciergeUnavailable;
        let _not_found = CrewlinkError::NotFound {
            entity: "room",
            id: "r-1".into(),
        };
        let _validation = CrewlinkError::Validation("empty content".into());
        let _conflict = CrewlinkError::Conflict("duplicate key".into());
        let _timeout = CrewlinkError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = CrewlinkError::Internal("test".into());
    }

    #[test]
    fn not_found_renders_entity_and_id() {
        let err = CrewlinkError::NotFound {
            entity: "user",
            id: "u-42".into(),
        };
        assert_eq!(err.to_string(), "user not found: u-42");
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // If any trait module is missing or broken, this won't compile.
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_chat_store<T: ChatStore>() {}
        fn _assert_concierge_provider<T: ConciergeProvider>() {}
    }
}

// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concierge capability trait for the language-model backend.

use async_trait::async_trait;

use crate::error::CrewlinkError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ConciergeReply, ConciergeRequest};

/// Capability interface for the concierge model backend.
///
/// Passed explicitly at construction time; when the feature is disabled a
/// no-op implementation reporting `available() == false` is wired instead of
/// a nullable field checked ad hoc.
#[async_trait]
pub trait ConciergeProvider: PluginAdapter {
    /// Whether the backend is configured and reachable in principle.
    fn available(&self) -> bool;

    /// Sends a completion request and returns the full reply.
    async fn complete(&self, request: ConciergeRequest)
        -> Result<ConciergeReply, CrewlinkError>;
}

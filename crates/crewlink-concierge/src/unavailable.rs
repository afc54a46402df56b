// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! No-op concierge capability used when the feature is disabled.

use async_trait::async_trait;

use crewlink_core::types::{ConciergeReply, ConciergeRequest};
use crewlink_core::{ConciergeProvider, CrewlinkError, HealthStatus, PluginAdapter};

/// Stand-in provider wired when no model backend is configured.
///
/// Reports itself unavailable; `complete` is unreachable through the session
/// but fails closed if called directly.
pub struct UnavailableConcierge;

#[async_trait]
impl PluginAdapter for UnavailableConcierge {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, CrewlinkError> {
        Ok(HealthStatus::Unhealthy("concierge not configured".to_string()))
    }

    async fn shutdown(&self) -> Result<(), CrewlinkError> {
        Ok(())
    }
}

#[async_trait]
impl ConciergeProvider for UnavailableConcierge {
    fn available(&self) -> bool {
        false
    }

    async fn complete(
        &self,
        _request: ConciergeRequest,
    ) -> Result<ConciergeReply, CrewlinkError> {
        Err(CrewlinkError::ConciergeUnavailable)
    }
}

// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all pluggable backends implement.

use async_trait::async_trait;

use crate::error::CrewlinkError;
use crate::types::HealthStatus;

/// The base trait for Crewlink backend adapters.
///
/// Every adapter (storage, concierge provider) implements this trait, which
/// provides identity, health check, and shutdown capabilities.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, CrewlinkError>;

    /// Gracefully shuts down the adapter, releasing any held resources.
    async fn shutdown(&self) -> Result<(), CrewlinkError>;
}

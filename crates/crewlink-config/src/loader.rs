// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./crewlink.toml` > `~/.config/crewlink/crewlink.toml`
//! > `/etc/crewlink/crewlink.toml`, with environment variable overrides via the
//! `CREWLINK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CrewlinkConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/crewlink/crewlink.toml` (system-wide)
/// 3. `~/.config/crewlink/crewlink.toml` (user XDG config)
/// 4. `./crewlink.toml` (local directory)
/// 5. `CREWLINK_*` environment variables
pub fn load_config() -> Result<CrewlinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CrewlinkConfig::default()))
        .merge(Toml::file("/etc/crewlink/crewlink.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("crewlink/crewlink.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("crewlink.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<CrewlinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CrewlinkConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CrewlinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CrewlinkConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `CREWLINK_CONCIERGE_API_KEY` must map to
/// `concierge.api_key`, not `concierge.api.key`.
fn env_provider() -> Env {
    Env::prefixed("CREWLINK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: CREWLINK_STORAGE_DATABASE_PATH -> "storage_database_path"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("concierge_", "concierge.", 1);
        mapped.into()
    })
}

// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization semantic validation.
//!
//! Figment/serde catch structural problems (unknown keys, type mismatches);
//! this module checks values that parse fine but cannot work at runtime.

use thiserror::Error;

use crate::model::CrewlinkConfig;

/// A single configuration problem, keyed by the offending field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ConfigError {
    /// Dotted path of the field, e.g. `service.log_level`.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a loaded configuration, collecting every problem rather than
/// stopping at the first.
pub fn validate_config(config: &CrewlinkConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        errors.push(ConfigError::new(
            "service.log_level",
            format!(
                "unknown log level {:?}, expected one of {LOG_LEVELS:?}",
                config.service.log_level
            ),
        ));
    }

    if config.service.name.trim().is_empty() {
        errors.push(ConfigError::new("service.name", "must not be empty"));
    }

    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::new("gateway.host", "must not be empty"));
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::new("storage.database_path", "must not be empty"));
    }

    if config.concierge.max_tokens == 0 {
        errors.push(ConfigError::new("concierge.max_tokens", "must be at least 1"));
    }

    if config.concierge.request_timeout_secs == 0 {
        errors.push(ConfigError::new(
            "concierge.request_timeout_secs",
            "must be at least 1",
        ));
    }

    if let Some(ref key) = config.concierge.api_key {
        if key.trim().is_empty() {
            errors.push(ConfigError::new(
                "concierge.api_key",
                "set to an empty string; omit the key to disable the concierge",
            ));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

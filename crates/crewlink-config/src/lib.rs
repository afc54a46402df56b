// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Crewlink chat core.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides.
//!
//! # Usage
//!
//! ```no_run
//! let config = crewlink_config::load_and_validate().expect("config errors");
//! println!("service: {}", config.service.name);
//! ```

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::CrewlinkConfig;
pub use validation::{ConfigError, validate_config};

/// Load configuration from the XDG hierarchy and validate it.
///
/// Figment errors (unknown keys, type mismatches) and semantic validation
/// failures are both reported as a list of [`ConfigError`]s.
pub fn load_and_validate() -> Result<CrewlinkConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(figment_to_config_errors(&err)),
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<CrewlinkConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(figment_to_config_errors(&err)),
    }
}

/// Print configuration errors to stderr, one per line.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("config error: {error}");
    }
}

/// Flatten a figment error chain into field-keyed config errors.
fn figment_to_config_errors(err: &figment::Error) -> Vec<ConfigError> {
    err.clone()
        .into_iter()
        .map(|e| ConfigError {
            field: e.path.join("."),
            message: e.kind.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = load_and_validate_str("").unwrap();
        assert_eq!(config.service.name, "crewlink");
        assert_eq!(config.gateway.port, 8080);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = load_and_validate_str("[service]\nnmae = \"typo\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn semantic_error_surfaces_field_path() {
        let errors =
            load_and_validate_str("[concierge]\nmax_tokens = 0\n").unwrap_err();
        assert!(errors.iter().any(|e| e.field == "concierge.max_tokens"));
    }
}

// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for config parsing, defaults, and validation.

use crewlink_config::{load_and_validate_str, load_config_from_str};

#[test]
fn full_config_parses() {
    let toml = r#"
        [service]
        name = "crewlink-staging"
        log_level = "debug"

        [gateway]
        host = "0.0.0.0"
        port = 9090

        [storage]
        database_path = "/tmp/crewlink-test.db"
        wal_mode = false

        [concierge]
        api_key = "sk-test-key"
        model = "claude-sonnet-4-20250514"
        max_tokens = 512
        system_prompt = "You are the {topic} crew concierge."
        request_timeout_secs = 10
    "#;

    let config = load_and_validate_str(toml).unwrap();
    assert_eq!(config.service.name, "crewlink-staging");
    assert_eq!(config.service.log_level, "debug");
    assert_eq!(config.gateway.host, "0.0.0.0");
    assert_eq!(config.gateway.port, 9090);
    assert_eq!(config.storage.database_path, "/tmp/crewlink-test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.concierge.api_key.as_deref(), Some("sk-test-key"));
    assert_eq!(config.concierge.max_tokens, 512);
    assert_eq!(config.concierge.request_timeout_secs, 10);
}

#[test]
fn partial_config_fills_defaults() {
    let config = load_and_validate_str("[gateway]\nport = 3000\n").unwrap();
    assert_eq!(config.gateway.port, 3000);
    // Everything else defaulted.
    assert_eq!(config.gateway.host, "127.0.0.1");
    assert_eq!(config.service.name, "crewlink");
    assert!(config.concierge.api_key.is_none());
}

#[test]
fn unknown_section_key_is_rejected() {
    let result = load_config_from_str("[gateway]\nprot = 3000\n");
    assert!(result.is_err(), "typo'd key should be rejected");
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let result = load_config_from_str("[gatway]\nport = 3000\n");
    assert!(result.is_err(), "typo'd section should be rejected");
}

#[test]
fn wrong_type_is_rejected() {
    let result = load_config_from_str("[gateway]\nport = \"not-a-port\"\n");
    assert!(result.is_err());
}

#[test]
fn invalid_log_level_fails_validation() {
    let errors = load_and_validate_str("[service]\nlog_level = \"shout\"\n").unwrap_err();
    assert!(errors.iter().any(|e| e.field == "service.log_level"));
}

#[test]
fn zero_timeout_fails_validation() {
    let errors =
        load_and_validate_str("[concierge]\nrequest_timeout_secs = 0\n").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "concierge.request_timeout_secs");
}

// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. All failures are collected; validation never stops early.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::CourierConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &CourierConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        fail(format!(
            "service.log_level `{}` must be one of {}",
            config.service.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.server.secrets.iter().any(|s| s.trim().is_empty()) {
        fail("server.secrets must not contain empty values".to_string());
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    let mut seen = HashSet::new();
    for user in &config.access.allowed_users {
        if user.trim().is_empty() {
            fail("access.allowed_users must not contain empty names".to_string());
        } else if !seen.insert(user) {
            fail(format!("duplicate user `{user}` in access.allowed_users"));
        }
    }

    let base_url = config.client.base_url.as_str();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        fail(format!(
            "client.base_url `{base_url}` must start with http:// or https://"
        ));
    }
    if config.client.poll_interval_ms == 0 {
        fail("client.poll_interval_ms must be greater than 0".to_string());
    }
    if config.client.timeout_secs == 0 {
        fail("client.timeout_secs must be greater than 0".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Extra requirements for running the gateway.
///
/// A server without secrets would reject every request, and one without
/// users would answer nobody, so both are refused at startup.
pub fn validate_serve_requirements(config: &CourierConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    if config.server.secrets.is_empty() {
        errors.push(ConfigError::MissingKey {
            key: "server.secrets".to_string(),
        });
    }
    if config.access.allowed_users.is_empty() {
        errors.push(ConfigError::MissingKey {
            key: "access.allowed_users".to_string(),
        });
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

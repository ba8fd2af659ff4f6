// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./courier.toml` > `~/.config/courier/courier.toml` > `/etc/courier/courier.toml`
//! with environment variable overrides via `COURIER_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CourierConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/courier/courier.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "courier.toml";

/// Top-level sections, used to split env var names into dotted keys.
const SECTIONS: &[&str] = &["service", "server", "storage", "access", "client"];

/// The per-user config file under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("courier/courier.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/courier/courier.toml` (system-wide)
/// 3. `~/.config/courier/courier.toml` (user XDG config)
/// 4. `./courier.toml` (local directory)
/// 5. `COURIER_*` environment variables
pub fn load_config() -> Result<CourierConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<CourierConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CourierConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CourierConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CourierConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(CourierConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Create the environment variable provider.
///
/// Only the leading section name is turned into a dot, so
/// `COURIER_STORAGE_DATABASE_PATH` maps to `storage.database_path` rather
/// than `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("COURIER_").map(|key| {
        let key_str = key.as_str();
        SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|field| format!("{section}.{field}"))
            })
            .unwrap_or_else(|| key_str.to_string())
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_vars_override_files() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "courier.toml",
                r#"
[server]
port = 9000

[storage]
database_path = "/tmp/file.db"
"#,
            )?;
            jail.set_env("COURIER_STORAGE_DATABASE_PATH", "/tmp/env.db");
            jail.set_env("COURIER_ACCESS_ALLOWED_USERS", "[alice, bob]");

            let config = load_config_from_path(Path::new("courier.toml"))?;
            assert_eq!(config.server.port, 9000);
            assert_eq!(config.storage.database_path, "/tmp/env.db");
            assert_eq!(config.access.allowed_users, vec!["alice", "bob"]);
            Ok(())
        });
    }

    #[test]
    fn env_keys_with_underscores_keep_field_names() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("COURIER_CLIENT_POLL_INTERVAL_MS", "250");
            jail.set_env("COURIER_SERVER_DEBUG", "true");
            let config: CourierConfig = Figment::new()
                .merge(Serialized::defaults(CourierConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.client.poll_interval_ms, 250);
            assert!(config.server.debug);
            Ok(())
        });
    }
}

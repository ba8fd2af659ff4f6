// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness over a temp-file SQLite store.
//!
//! `TestHarness` creates a temp directory, opens a [`SqliteStorage`] inside
//! it, and carries a [`CourierConfig`] pointing at the same file with one
//! secret and one allowed user filled in.

use std::sync::Arc;

use courier_config::CourierConfig;
use courier_config::model::{AccessConfig, StorageConfig};
use courier_core::{CourierError, TaskStore};
use courier_storage::SqliteStorage;

/// Secret configured by [`TestHarness`].
pub const TEST_SECRET: &str = "test-secret";

/// User allowed by [`TestHarness`].
pub const TEST_USER: &str = "alice";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    allowed_users: Vec<String>,
    secrets: Vec<String>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            allowed_users: vec![TEST_USER.to_string()],
            secrets: vec![TEST_SECRET.to_string()],
        }
    }

    /// Replace the allow-list.
    pub fn with_allowed_users(mut self, users: &[&str]) -> Self {
        self.allowed_users = users.iter().map(|u| u.to_string()).collect();
        self
    }

    /// Replace the configured secrets.
    pub fn with_secrets(mut self, secrets: &[&str]) -> Self {
        self.secrets = secrets.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Open the SQLite store and build the harness.
    pub async fn build(self) -> Result<TestHarness, CourierError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| CourierError::storage("create temp dir", e))?;
        let db_path = temp_dir.path().join("test.db");

        let storage_config = StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
        };
        let storage = SqliteStorage::new(storage_config.clone());
        storage.initialize().await?;

        let mut config = CourierConfig {
            storage: storage_config,
            access: AccessConfig {
                allowed_users: self.allowed_users,
            },
            ..CourierConfig::default()
        };
        config.server.secrets = self.secrets;

        Ok(TestHarness {
            store: Arc::new(storage),
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A ready SQLite store plus the config it was built from.
///
/// The temp directory is removed when the harness is dropped.
pub struct TestHarness {
    pub store: Arc<SqliteStorage>,
    pub config: CourierConfig,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// The store as the trait object the engine and gateway take.
    pub fn task_store(&self) -> Arc<dyn TaskStore> {
        self.store.clone()
    }
}

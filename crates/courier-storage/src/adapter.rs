// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`TaskStore`] trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use courier_config::model::StorageConfig;
use courier_core::{
    CourierError, Dialog, HealthStatus, PluginAdapter, Task, TaskStatus, TaskStore, TaskType,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed task store.
///
/// Wraps a [`Database`] handle and delegates to the query modules. The
/// database is opened on the first call to [`TaskStore::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`TaskStore::initialize`] is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, CourierError> {
        self.db.get().ok_or_else(|| {
            CourierError::storage("storage", "not initialized, call initialize() first")
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, CourierError> {
        let Ok(db) = self.db() else {
            return Ok(HealthStatus::Unhealthy("storage not initialized".into()));
        };
        let probe = db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await;
        Ok(match probe {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        })
    }

    async fn shutdown(&self) -> Result<(), CourierError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl TaskStore for SqliteStorage {
    async fn initialize(&self) -> Result<(), CourierError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db
            .set(db)
            .map_err(|_| CourierError::storage("storage", "already initialized"))?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), CourierError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    async fn add_dialog(&self, dialog: &Dialog) -> Result<i64, CourierError> {
        queries::dialogs::add_dialog(self.db()?, dialog).await
    }

    async fn get_dialog(&self, id: i64) -> Result<Dialog, CourierError> {
        queries::dialogs::get_dialog(self.db()?, id).await
    }

    async fn update_dialog(&self, dialog: &Dialog) -> Result<(), CourierError> {
        queries::dialogs::update_dialog(self.db()?, dialog).await
    }

    async fn add_task(&self, task: &Task) -> Result<i64, CourierError> {
        queries::tasks::add_task(self.db()?, task).await
    }

    async fn get_task(&self, id: i64) -> Result<Task, CourierError> {
        queries::tasks::get_task(self.db()?, id).await
    }

    async fn first_task_by_type(
        &self,
        task_type: TaskType,
    ) -> Result<Option<Task>, CourierError> {
        queries::tasks::first_task_by_type(self.db()?, task_type).await
    }

    async fn claim_next_task(&self, task_type: TaskType) -> Result<Option<Task>, CourierError> {
        queries::tasks::claim_next_task(self.db()?, task_type).await
    }

    async fn update_task_status(&self, id: i64, status: TaskStatus) -> Result<(), CourierError> {
        queries::tasks::update_task_status(self.db()?, id, status).await
    }

    async fn advance_task_status(
        &self,
        id: i64,
        from: TaskStatus,
        to: TaskStatus,
    ) -> Result<bool, CourierError> {
        queries::tasks::advance_task_status(self.db()?, id, from, to).await
    }

    async fn delete_all_tasks(&self) -> Result<u64, CourierError> {
        queries::tasks::delete_all_tasks(self.db()?).await
    }

    async fn delete_all_dialogs(&self) -> Result<u64, CourierError> {
        queries::dialogs::delete_all_dialogs(self.db()?).await
    }
}

// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence contract for dialogs and tasks.

use async_trait::async_trait;

use crate::dialog::Dialog;
use crate::error::CourierError;
use crate::task::Task;
use crate::traits::adapter::PluginAdapter;
use crate::types::{TaskStatus, TaskType};

/// Storage backend for dialogs and the typed task queue.
///
/// A dialog's message sequence and a task's payload are opaque blobs to the
/// store; serialization belongs to `courier-core`. Lookups by identity return
/// [`CourierError::NotFound`] when the row does not exist.
#[async_trait]
pub trait TaskStore: PluginAdapter {
    /// Prepares the backend (migrations, connection setup).
    async fn initialize(&self) -> Result<(), CourierError>;

    /// Flushes pending writes and releases connections.
    async fn close(&self) -> Result<(), CourierError>;

    /// Inserts a dialog and returns its generated identity.
    async fn add_dialog(&self, dialog: &Dialog) -> Result<i64, CourierError>;

    async fn get_dialog(&self, id: i64) -> Result<Dialog, CourierError>;

    /// Overwrites status and messages of an existing dialog.
    async fn update_dialog(&self, dialog: &Dialog) -> Result<(), CourierError>;

    /// Inserts a task with its current status and returns its identity.
    async fn add_task(&self, task: &Task) -> Result<i64, CourierError>;

    async fn get_task(&self, id: i64) -> Result<Task, CourierError>;

    /// The oldest task of `task_type` still in `Create`, without claiming it.
    async fn first_task_by_type(&self, task_type: TaskType)
    -> Result<Option<Task>, CourierError>;

    /// Atomically moves the oldest `Create` task of `task_type` to `Sended`
    /// and returns it.
    ///
    /// Concurrent callers never receive the same task. `None` means the
    /// queue for that type is empty.
    async fn claim_next_task(&self, task_type: TaskType) -> Result<Option<Task>, CourierError>;

    async fn update_task_status(&self, id: i64, status: TaskStatus) -> Result<(), CourierError>;

    /// Moves task `id` from `from` to `to` in one conditional write.
    ///
    /// Returns `false`, leaving the row untouched, when the task is no longer
    /// in `from`.
    async fn advance_task_status(
        &self,
        id: i64,
        from: TaskStatus,
        to: TaskStatus,
    ) -> Result<bool, CourierError>;

    /// Deletes every task, returning the number of rows removed.
    async fn delete_all_tasks(&self) -> Result<u64, CourierError>;

    /// Deletes every dialog, returning the number of rows removed.
    ///
    /// Tasks reference dialogs, so tasks must be purged first.
    async fn delete_all_dialogs(&self) -> Result<u64, CourierError>;
}

// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory task store for engine tests.
//!
//! `MemoryStore` implements [`TaskStore`] over two ordered maps behind one
//! mutex, so claims are as atomic as the SQLite store's. Individual
//! operations can be made to fail to exercise error paths, and a task read
//! can be made to return an outdated copy to replay racing reports.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use courier_core::{
    CourierError, Dialog, HealthStatus, PluginAdapter, Task, TaskStatus, TaskStore, TaskType,
};

#[derive(Default)]
struct State {
    dialogs: BTreeMap<i64, Dialog>,
    tasks: BTreeMap<i64, Task>,
    next_dialog_id: i64,
    next_task_id: i64,
    failing: HashSet<&'static str>,
    stale_reads: HashMap<i64, Task>,
}

impl State {
    fn check(&self, op: &'static str) -> Result<(), CourierError> {
        if self.failing.contains(op) {
            return Err(CourierError::storage(op, "injected failure"));
        }
        Ok(())
    }
}

/// A [`TaskStore`] that keeps everything in process memory.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later call to `op` (a trait method name such as
    /// `"add_task"`) fail with a storage error.
    pub async fn fail_on(&self, op: &'static str) {
        self.state.lock().await.failing.insert(op);
    }

    /// Makes the next `get_task` for `task.id` return `task` as given
    /// instead of the stored row.
    pub async fn serve_stale_read(&self, task: Task) {
        self.state.lock().await.stale_reads.insert(task.id, task);
    }

    /// All tasks in insertion order.
    pub async fn tasks(&self) -> Vec<Task> {
        self.state.lock().await.tasks.values().cloned().collect()
    }

    /// All dialogs in insertion order.
    pub async fn dialogs(&self) -> Vec<Dialog> {
        self.state.lock().await.dialogs.values().cloned().collect()
    }
}

#[async_trait]
impl PluginAdapter for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, CourierError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CourierError> {
        Ok(())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn initialize(&self) -> Result<(), CourierError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), CourierError> {
        Ok(())
    }

    async fn add_dialog(&self, dialog: &Dialog) -> Result<i64, CourierError> {
        let mut state = self.state.lock().await;
        state.check("add_dialog")?;
        state.next_dialog_id += 1;
        let id = state.next_dialog_id;
        state.dialogs.insert(
            id,
            Dialog {
                id,
                ..dialog.clone()
            },
        );
        Ok(id)
    }

    async fn get_dialog(&self, id: i64) -> Result<Dialog, CourierError> {
        let state = self.state.lock().await;
        state.check("get_dialog")?;
        state
            .dialogs
            .get(&id)
            .cloned()
            .ok_or_else(|| CourierError::not_found("dialog", id))
    }

    async fn update_dialog(&self, dialog: &Dialog) -> Result<(), CourierError> {
        let mut state = self.state.lock().await;
        state.check("update_dialog")?;
        match state.dialogs.get_mut(&dialog.id) {
            Some(stored) => {
                stored.status = dialog.status;
                stored.messages = dialog.messages.clone();
                Ok(())
            }
            None => Err(CourierError::not_found("dialog", dialog.id)),
        }
    }

    async fn add_task(&self, task: &Task) -> Result<i64, CourierError> {
        let mut state = self.state.lock().await;
        state.check("add_task")?;
        if !state.dialogs.contains_key(&task.dialog_id) {
            return Err(CourierError::storage(
                "add task",
                "FOREIGN KEY constraint failed",
            ));
        }
        state.next_task_id += 1;
        let id = state.next_task_id;
        state.tasks.insert(
            id,
            Task {
                id,
                ..task.clone()
            },
        );
        Ok(id)
    }

    async fn get_task(&self, id: i64) -> Result<Task, CourierError> {
        let mut state = self.state.lock().await;
        state.check("get_task")?;
        if let Some(stale) = state.stale_reads.remove(&id) {
            return Ok(stale);
        }
        state
            .tasks
            .get(&id)
            .cloned()
            .ok_or_else(|| CourierError::not_found("task", id))
    }

    async fn first_task_by_type(
        &self,
        task_type: TaskType,
    ) -> Result<Option<Task>, CourierError> {
        let state = self.state.lock().await;
        state.check("first_task_by_type")?;
        Ok(state
            .tasks
            .values()
            .find(|t| t.task_type() == task_type && t.status == TaskStatus::Create)
            .cloned())
    }

    async fn claim_next_task(&self, task_type: TaskType) -> Result<Option<Task>, CourierError> {
        let mut state = self.state.lock().await;
        state.check("claim_next_task")?;
        let pending = state
            .tasks
            .values_mut()
            .find(|t| t.task_type() == task_type && t.status == TaskStatus::Create);
        Ok(pending.map(|task| {
            task.status = TaskStatus::Sended;
            task.clone()
        }))
    }

    async fn update_task_status(&self, id: i64, status: TaskStatus) -> Result<(), CourierError> {
        let mut state = self.state.lock().await;
        state.check("update_task_status")?;
        match state.tasks.get_mut(&id) {
            Some(task) => {
                task.status = status;
                Ok(())
            }
            None => Err(CourierError::not_found("task", id)),
        }
    }

    async fn advance_task_status(
        &self,
        id: i64,
        from: TaskStatus,
        to: TaskStatus,
    ) -> Result<bool, CourierError> {
        let mut state = self.state.lock().await;
        state.check("advance_task_status")?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or_else(|| CourierError::not_found("task", id))?;
        if task.status != from {
            return Ok(false);
        }
        task.status = to;
        Ok(true)
    }

    async fn delete_all_tasks(&self) -> Result<u64, CourierError> {
        let mut state = self.state.lock().await;
        state.check("delete_all_tasks")?;
        let n = state.tasks.len() as u64;
        state.tasks.clear();
        Ok(n)
    }

    async fn delete_all_dialogs(&self) -> Result<u64, CourierError> {
        let mut state = self.state.lock().await;
        state.check("delete_all_dialogs")?;
        if !state.tasks.is_empty() {
            return Err(CourierError::storage(
                "delete dialogs",
                "FOREIGN KEY constraint failed",
            ));
        }
        let n = state.dialogs.len() as u64;
        state.dialogs.clear();
        Ok(n)
    }
}

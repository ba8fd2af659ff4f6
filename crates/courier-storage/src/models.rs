// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw row shapes read from SQLite.
//!
//! Rows are read inside the connection thread as plain columns and decoded
//! into domain types afterwards, so serde never runs on the writer thread.

use courier_core::{
    CourierError, Dialog, DialogStatus, Task, TaskEnvelope, TaskPayload, TaskStatus, TaskType,
};

/// One `dialog` row.
#[derive(Debug, Clone)]
pub struct DialogRow {
    pub id: i64,
    pub key: String,
    pub status: i64,
    pub data: Vec<u8>,
}

impl DialogRow {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            key: row.get(1)?,
            status: row.get(2)?,
            data: row.get(3)?,
        })
    }

    pub fn into_dialog(self) -> Result<Dialog, CourierError> {
        let status = DialogStatus::try_from(self.status)
            .map_err(|e| CourierError::storage("decode dialog status", e))?;
        let messages = Dialog::messages_from_blob(&self.data)
            .map_err(|e| CourierError::storage("decode dialog messages", e))?;
        Ok(Dialog {
            id: self.id,
            key: self.key,
            status,
            messages,
        })
    }
}

/// One `task` row.
#[derive(Debug, Clone)]
pub struct TaskRow {
    pub id: i64,
    pub dialog_id: i64,
    pub status: i64,
    pub task_type: i64,
    pub data: Vec<u8>,
}

impl TaskRow {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            dialog_id: row.get(1)?,
            status: row.get(2)?,
            task_type: row.get(3)?,
            data: row.get(4)?,
        })
    }

    /// Decodes the row, checking the stored type tag against the payload.
    pub fn into_task(self) -> Result<Task, CourierError> {
        let status = TaskStatus::try_from(self.status)
            .map_err(|e| CourierError::storage("decode task status", e))?;
        let task_type = TaskType::try_from(self.task_type)
            .map_err(|e| CourierError::storage("decode task type", e))?;
        let payload = TaskPayload::from_blob(&self.data)
            .map_err(|e| CourierError::storage("decode task payload", e))?;
        Task::try_from(TaskEnvelope {
            id: self.id,
            dialog_id: self.dialog_id,
            status,
            task_type,
            task_data: Some(payload),
        })
        .map_err(|e| CourierError::storage("decode task", e))
    }
}

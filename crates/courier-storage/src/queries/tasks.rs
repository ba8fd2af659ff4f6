// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task queue operations.

use courier_core::{CourierError, Task, TaskStatus, TaskType};
use rusqlite::{OptionalExtension, params};

use crate::database::{Database, map_tr_err};
use crate::models::TaskRow;

/// Inserts a task with its current status. Returns the generated id.
pub async fn add_task(db: &Database, task: &Task) -> Result<i64, CourierError> {
    let dialog_id = task.dialog_id;
    let status = task.status.code();
    let task_type = task.task_type().code();
    let data = task
        .payload
        .to_blob()
        .map_err(|e| CourierError::storage("encode task payload", e))?;

    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT INTO task (dialog, status, type, data) VALUES (?1, ?2, ?3, ?4)",
                params![dialog_id, status, task_type, data],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(|e| map_tr_err("add task", e))
}

pub async fn get_task(db: &Database, id: i64) -> Result<Task, CourierError> {
    let row = db
        .connection()
        .call(move |conn| -> Result<Option<TaskRow>, rusqlite::Error> {
            conn.query_row(
                "SELECT id, dialog, status, type, data FROM task WHERE id = ?1",
                params![id],
                TaskRow::from_row,
            )
            .optional()
        })
        .await
        .map_err(|e| map_tr_err("get task", e))?;

    row.ok_or_else(|| CourierError::not_found("task", id))?
        .into_task()
}

/// The oldest pending task of `task_type`, left untouched.
pub async fn first_task_by_type(
    db: &Database,
    task_type: TaskType,
) -> Result<Option<Task>, CourierError> {
    let type_code = task_type.code();
    let pending = TaskStatus::Create.code();
    let row = db
        .connection()
        .call(move |conn| -> Result<Option<TaskRow>, rusqlite::Error> {
            conn.query_row(
                "SELECT id, dialog, status, type, data FROM task
                 WHERE type = ?1 AND status = ?2
                 ORDER BY id ASC
                 LIMIT 1",
                params![type_code, pending],
                TaskRow::from_row,
            )
            .optional()
        })
        .await
        .map_err(|e| map_tr_err("first task by type", e))?;

    row.map(TaskRow::into_task).transpose()
}

/// Claims the oldest pending task of `task_type`.
///
/// Selection and the `Create -> Sended` write happen in one conditional
/// `UPDATE`, so two pollers of the same type can never receive the same row.
pub async fn claim_next_task(
    db: &Database,
    task_type: TaskType,
) -> Result<Option<Task>, CourierError> {
    let type_code = task_type.code();
    let pending = TaskStatus::Create.code();
    let claimed = TaskStatus::Sended.code();
    let row = db
        .connection()
        .call(move |conn| -> Result<Option<TaskRow>, rusqlite::Error> {
            conn.query_row(
                "UPDATE task SET status = ?1,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = (
                     SELECT id FROM task
                     WHERE type = ?2 AND status = ?3
                     ORDER BY id ASC
                     LIMIT 1
                 ) AND status = ?3
                 RETURNING id, dialog, status, type, data",
                params![claimed, type_code, pending],
                TaskRow::from_row,
            )
            .optional()
        })
        .await
        .map_err(|e| map_tr_err("claim task", e))?;

    row.map(TaskRow::into_task).transpose()
}

pub async fn update_task_status(
    db: &Database,
    id: i64,
    status: TaskStatus,
) -> Result<(), CourierError> {
    if id == 0 {
        return Err(CourierError::InvalidInput("task id is required".into()));
    }
    let code = status.code();
    let changed = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute(
                "UPDATE task SET status = ?1,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2",
                params![code, id],
            )
        })
        .await
        .map_err(|e| map_tr_err("update task status", e))?;

    if changed == 0 {
        return Err(CourierError::not_found("task", id));
    }
    Ok(())
}

/// Compare-and-set on the status column: writes `to` only while the row is
/// still in `from`.
pub async fn advance_task_status(
    db: &Database,
    id: i64,
    from: TaskStatus,
    to: TaskStatus,
) -> Result<bool, CourierError> {
    let (from_code, to_code) = (from.code(), to.code());
    let (changed, exists) = db
        .connection()
        .call(move |conn| -> Result<(usize, bool), rusqlite::Error> {
            let changed = conn.execute(
                "UPDATE task SET status = ?1,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2 AND status = ?3",
                params![to_code, id, from_code],
            )?;
            if changed > 0 {
                return Ok((changed, true));
            }
            let exists = conn
                .query_row("SELECT 1 FROM task WHERE id = ?1", params![id], |_| Ok(()))
                .optional()?
                .is_some();
            Ok((changed, exists))
        })
        .await
        .map_err(|e| map_tr_err("advance task status", e))?;

    if !exists {
        return Err(CourierError::not_found("task", id));
    }
    Ok(changed > 0)
}

pub async fn delete_all_tasks(db: &Database) -> Result<u64, CourierError> {
    db.connection()
        .call(|conn| -> Result<usize, rusqlite::Error> { conn.execute("DELETE FROM task", []) })
        .await
        .map(|n| n as u64)
        .map_err(|e| map_tr_err("delete tasks", e))
}

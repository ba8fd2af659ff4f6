// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CRUD for the `dialog` table.

use courier_core::{CourierError, Dialog};
use rusqlite::{OptionalExtension, params};

use crate::database::{Database, map_tr_err};
use crate::models::DialogRow;

/// Inserts a dialog and returns its generated id.
pub async fn add_dialog(db: &Database, dialog: &Dialog) -> Result<i64, CourierError> {
    let key = dialog.key.clone();
    let status = dialog.status.code();
    let data = dialog
        .messages_blob()
        .map_err(|e| CourierError::storage("encode dialog messages", e))?;

    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT INTO dialog (key, dialogstatus, data) VALUES (?1, ?2, ?3)",
                params![key, status, data],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(|e| map_tr_err("add dialog", e))
}

pub async fn get_dialog(db: &Database, id: i64) -> Result<Dialog, CourierError> {
    let row = db
        .connection()
        .call(move |conn| -> Result<Option<DialogRow>, rusqlite::Error> {
            conn.query_row(
                "SELECT id, key, dialogstatus, data FROM dialog WHERE id = ?1",
                params![id],
                DialogRow::from_row,
            )
            .optional()
        })
        .await
        .map_err(|e| map_tr_err("get dialog", e))?;

    row.ok_or_else(|| CourierError::not_found("dialog", id))?
    .into_dialog()
}

/// Overwrites status and messages of an existing dialog.
pub async fn update_dialog(db: &Database, dialog: &Dialog) -> Result<(), CourierError> {
    let id = dialog.id;
    if id == 0 {
        return Err(CourierError::InvalidInput("dialog id is required".into()));
    }
    let status = dialog.status.code();
    let data = dialog
        .messages_blob()
        .map_err(|e| CourierError::storage("encode dialog messages", e))?;

    let changed = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute(
                "UPDATE dialog SET dialogstatus = ?1, data = ?2,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?3",
                params![status, data, id],
            )
        })
        .await
        .map_err(|e| map_tr_err("update dialog", e))?;

    if changed == 0 {
        return Err(CourierError::not_found("dialog", id));
    }
    Ok(())
}

/// Deletes every dialog. Tasks must be deleted first.
pub async fn delete_all_dialogs(db: &Database) -> Result<u64, CourierError> {
    db.connection()
        .call(|conn| -> Result<usize, rusqlite::Error> { conn.execute("DELETE FROM dialog", []) })
        .await
        .map(|n| n as u64)
        .map_err(|e| map_tr_err("delete dialogs", e))
}

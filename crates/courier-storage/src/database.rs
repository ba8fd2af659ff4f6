// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All access is serialized through tokio-rusqlite's single background
//! thread. `Database` is the only writer; do not open additional
//! connections for writes.

use std::path::Path;

use courier_core::CourierError;
use tracing::{debug, info};

use crate::migrations;

/// Milliseconds SQLite waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Handle to the courier SQLite database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` in WAL mode and
    /// applies pending migrations.
    pub async fn open(path: &str) -> Result<Self, CourierError> {
        Self::open_with(path, true).await
    }

    /// Like [`Database::open`], with the journal mode chosen by `wal_mode`.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, CourierError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| CourierError::storage("create database directory", e))?;
            }
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| CourierError::storage("open database", e))?;
        let db = Self { conn };
        db.prepare(wal_mode).await?;
        info!(path, wal_mode, "database opened");
        Ok(db)
    }

    /// Opens a private in-memory database with the full schema.
    pub async fn open_in_memory() -> Result<Self, CourierError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| CourierError::storage("open database", e))?;
        let db = Self { conn };
        db.prepare(false).await?;
        Ok(db)
    }

    async fn prepare(&self, wal_mode: bool) -> Result<(), CourierError> {
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                if wal_mode {
                    conn.pragma_update(None, "journal_mode", "WAL")?;
                }
                conn.pragma_update(None, "synchronous", "NORMAL")?;
                conn.pragma_update(None, "foreign_keys", "ON")?;
                conn.pragma_update(None, "busy_timeout", BUSY_TIMEOUT_MS)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tr_err("configure database", e))?;

        self.conn
            .call(|conn| migrations::run_migrations(conn).map_err(|e| e.to_string()))
            .await
            .map_err(|e| CourierError::storage("run migrations", e.to_string()))?;
        debug!("schema up to date");
        Ok(())
    }

    /// The shared connection every query goes through.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Truncates the write-ahead log into the main database file.
    pub async fn checkpoint(&self) -> Result<(), CourierError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(|e| map_tr_err("checkpoint", e))
    }

    /// Checkpoints and closes the connection.
    pub async fn close(self) -> Result<(), CourierError> {
        self.checkpoint().await?;
        self.conn
            .close()
            .await
            .map_err(|e| CourierError::storage("close database", e))?;
        debug!("database closed");
        Ok(())
    }
}

/// Converts a tokio-rusqlite failure into a storage error naming `context`.
pub(crate) fn map_tr_err(
    context: &'static str,
    e: tokio_rusqlite::Error<rusqlite::Error>,
) -> CourierError {
    CourierError::storage(context, e)
}

// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `courier purge` command implementation.

use courier_config::CourierConfig;
use courier_core::{CourierError, TaskStore};
use courier_engine::purge_all;
use courier_storage::SqliteStorage;

/// Deletes every task and dialog from the configured database.
///
/// Refuses to run without `--yes`.
pub async fn run_purge(config: &CourierConfig, yes: bool) -> Result<(), CourierError> {
    if !yes {
        return Err(CourierError::InvalidInput(format!(
            "refusing to purge {} without --yes",
            config.storage.database_path
        )));
    }

    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    let report = purge_all(&storage).await;
    storage.close().await?;
    let report = report?;

    println!(
        "purged {} tasks and {} dialogs",
        report.tasks, report.dialogs
    );
    Ok(())
}

// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Administrative bulk purge.

use courier_core::{CourierError, TaskStore};
use tracing::info;

/// Rows removed by [`purge_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub tasks: u64,
    pub dialogs: u64,
}

/// Deletes every task, then every dialog.
///
/// Tasks go first because they reference their dialog.
pub async fn purge_all(store: &dyn TaskStore) -> Result<PurgeReport, CourierError> {
    let tasks = store
        .delete_all_tasks()
        .await
        .map_err(|e| e.context("deleteAllTasks"))?;
    let dialogs = store
        .delete_all_dialogs()
        .await
        .map_err(|e| e.context("deleteAllDialogs"))?;
    info!(tasks, dialogs, "store purged");
    Ok(PurgeReport { tasks, dialogs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::{Dialog, Message, NasOperation, Task, TaskPayload};
    use courier_test_utils::MemoryStore;

    #[tokio::test]
    async fn purge_counts_both_tables() {
        let store = MemoryStore::new();
        let dialog_id = store
            .add_dialog(&Dialog::begin(Message::default()))
            .await
            .unwrap();
        store.add_dialog(&Dialog::begin(Message::default())).await.unwrap();
        store
            .add_task(&Task::new(dialog_id, TaskPayload::Nas(NasOperation::List)))
            .await
            .unwrap();

        let report = purge_all(&store).await.unwrap();
        assert_eq!(report, PurgeReport { tasks: 1, dialogs: 2 });
        assert!(store.dialogs().await.is_empty());
    }

    #[tokio::test]
    async fn purge_stops_at_the_first_failure() {
        let store = MemoryStore::new();
        store.fail_on("delete_all_tasks").await;
        let err = purge_all(&store).await.unwrap_err();
        assert!(err.to_string().starts_with("deleteAllTasks"));
    }
}

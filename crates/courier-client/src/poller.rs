// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Poll/work/report loop for out-of-process workers.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use courier_core::{CourierError, Task, TaskStatus, TaskType};

use crate::client::CourierClient;

/// Performs the work carried by one task.
///
/// The returned text is reported with `Done` and becomes the chat reply;
/// an empty string sends nothing back.
#[async_trait]
pub trait TaskWorker: Send + Sync {
    async fn do_task(&self, task: &Task) -> Result<String, CourierError>;
}

/// Claims at most one task, runs `worker` on it and reports the outcome.
///
/// Returns the id of the handled task, or `None` when the queue was empty.
/// A worker failure is reported as `Error` with `"listeningTask: <err>"`
/// and is not an error of this call.
pub async fn poll_once(
    client: &CourierClient,
    task_type: TaskType,
    worker: &dyn TaskWorker,
) -> Result<Option<i64>, CourierError> {
    let Some(task) = client.claim_task(task_type).await? else {
        return Ok(None);
    };
    debug!(task_id = task.id, %task_type, "task received");

    match worker.do_task(&task).await {
        Ok(text) => {
            client.report_task(task.id, TaskStatus::Done, &text).await?;
        }
        Err(e) => {
            let text = format!("listeningTask: {e}");
            warn!(task_id = task.id, error = %e, "worker failed");
            client.report_task(task.id, TaskStatus::Error, &text).await?;
        }
    }
    Ok(Some(task.id))
}

/// Polls the gateway for `task_type` until `cancel` fires.
///
/// Each round claims and handles one task, then waits `interval`. Claim
/// and report failures are logged and retried on the next round.
/// Cancellation is observed between rounds only: a claimed task is always
/// run to completion and reported.
pub async fn listen_tasks(
    client: &CourierClient,
    task_type: TaskType,
    worker: &dyn TaskWorker,
    interval: Duration,
    cancel: CancellationToken,
) {
    info!(%task_type, "listening for tasks");
    while !cancel.is_cancelled() {
        if let Err(e) = poll_once(client, task_type, worker).await {
            warn!(%task_type, error = %e, "poll failed");
        }
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }
    info!(%task_type, "stopping listen tasks");
}

// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task lifecycle: classification, queueing, claims and reports.
//!
//! Status only moves forward (`Create -> Sended -> Done | Error`). A report
//! closes or errors the owning dialog and, when the worker returned text,
//! queues an outbound chat message addressed to the dialog's first message.

use std::sync::Arc;

use courier_core::{
    CourierError, DialogStatus, OutboundMessage, Task, TaskPayload, TaskStatus, TaskStore,
    TaskType,
};
use courier_router::Route;
use tracing::{debug, info};

/// Creates, hands out and finalizes tasks.
#[derive(Clone)]
pub struct TaskManager {
    store: Arc<dyn TaskStore>,
}

impl TaskManager {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Routes the single message of a freshly begun dialog.
    ///
    /// Returns the router's reply, or the acknowledgement once the routed
    /// task is queued. Router failures come back as
    /// [`CourierError::InvalidInput`] carrying the user-visible text.
    pub async fn process_dialog_begin(&self, dialog_id: i64) -> Result<String, CourierError> {
        let dialog = self
            .store
            .get_dialog(dialog_id)
            .await
            .map_err(|e| e.context("processDialogBegin getDialog"))?;

        if dialog.status != DialogStatus::Begin {
            return Err(CourierError::InvalidState("wrong dialog status".into()));
        }
        let [message] = dialog.messages.as_slice() else {
            return Err(CourierError::InvalidState(
                "wrong number of messages".into(),
            ));
        };

        let route = courier_router::route(message)
            .map_err(|e| CourierError::InvalidInput(e.to_string()))?;
        match route {
            Route::Reply(text) => Ok(text),
            Route::Enqueue { payload, ack } => {
                self.add_task(Task::new(dialog.id, payload))
                    .await
                    .map_err(|e| e.context("processDialogBegin"))?;
                Ok(ack.to_string())
            }
        }
    }

    /// Queues `task` with status `Create` and returns its identity.
    pub async fn add_task(&self, mut task: Task) -> Result<i64, CourierError> {
        let task_type = task.task_type();
        if task_type == TaskType::Undefined {
            return Err(CourierError::InvalidInput("invalid task type".into()));
        }
        if task.dialog_id == 0 {
            return Err(CourierError::InvalidInput(
                "task must reference a dialog".into(),
            ));
        }
        task.id = 0;
        task.status = TaskStatus::Create;

        let id = self
            .store
            .add_task(&task)
            .await
            .map_err(|e| e.context("addTask"))?;
        info!(task_id = id, dialog_id = task.dialog_id, task_type = %task_type, "task queued");
        Ok(id)
    }

    /// Claims the oldest pending task of `task_type`.
    ///
    /// `None` means nothing is pending; it is not an error.
    pub async fn claim_task(&self, task_type: TaskType) -> Result<Option<Task>, CourierError> {
        if task_type == TaskType::Undefined {
            return Err(CourierError::InvalidInput("invalid task type".into()));
        }
        let task = self
            .store
            .claim_next_task(task_type)
            .await
            .map_err(|e| e.context("getTask"))?;
        if let Some(task) = &task {
            debug!(task_id = task.id, task_type = %task_type, "task claimed");
        }
        Ok(task)
    }

    /// Applies a worker's result to a task and its dialog.
    ///
    /// A `Sended` report only records the claim. `Done` closes the dialog
    /// and `Error` fails it; either then queues `text_message` as a chat
    /// reply unless it is empty or the reported task was itself a reply.
    pub async fn report_task(
        &self,
        task_id: i64,
        status: TaskStatus,
        text_message: &str,
    ) -> Result<(), CourierError> {
        if matches!(status, TaskStatus::Undefined | TaskStatus::Create) {
            return Err(CourierError::InvalidInput(format!(
                "invalid task status {}",
                status.code()
            )));
        }

        let task = self
            .store
            .get_task(task_id)
            .await
            .map_err(|e| e.context("reportTask getTask"))?;
        let mut dialog = self
            .store
            .get_dialog(task.dialog_id)
            .await
            .map_err(|e| e.context("reportTask getDialog"))?;

        if status == TaskStatus::Sended {
            if task.status.can_advance_to(status) {
                self.store
                    .advance_task_status(task.id, task.status, status)
                    .await
                    .map_err(|e| e.context("reportTask updateTask"))?;
            }
            return Ok(());
        }

        if !task.status.can_advance_to(status) {
            return Err(CourierError::InvalidState(format!(
                "task {} cannot move from status {} to {}",
                task.id,
                task.status.code(),
                status.code()
            )));
        }
        // Another report may have moved the task since it was read.
        let advanced = self
            .store
            .advance_task_status(task.id, task.status, status)
            .await
            .map_err(|e| e.context("reportTask updateTask"))?;
        if !advanced {
            return Err(CourierError::InvalidState(format!(
                "task {} is no longer in status {}",
                task.id,
                task.status.code()
            )));
        }

        if !dialog.status.is_terminal() {
            dialog.status = if status == TaskStatus::Error {
                DialogStatus::Error
            } else {
                DialogStatus::Close
            };
            self.store
                .update_dialog(&dialog)
                .await
                .map_err(|e| e.context("reportTask updateDialog"))?;
        }
        info!(
            task_id = task.id,
            dialog_id = dialog.id,
            status = status.code(),
            "task reported"
        );

        if task.task_type() == TaskType::Message || text_message.is_empty() {
            return Ok(());
        }

        let Some(first) = dialog.first_message() else {
            return Err(CourierError::InvalidState(format!(
                "reportTask: dialog {} has no messages",
                dialog.id
            )));
        };
        let reply = Task::new(
            dialog.id,
            TaskPayload::Message(OutboundMessage {
                text: text_message.to_string(),
                chat_id: first.chat_id,
                reply_message_id: first.message_id,
            }),
        );
        self.add_task(reply)
            .await
            .map_err(|e| e.context("reportTask"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::{Dialog, HealthCheck, Message, TaskEnvelope, YoutubeDownload};
    use courier_test_utils::MemoryStore;

    fn message(text: &str) -> Message {
        Message {
            user_name: "alice".into(),
            chat_id: 42,
            message_id: 7,
            text: text.into(),
            ..Default::default()
        }
    }

    async fn setup(text: &str) -> (MemoryStore, TaskManager, i64) {
        let store = MemoryStore::new();
        let dialog_id = store.add_dialog(&Dialog::begin(message(text))).await.unwrap();
        (store.clone(), TaskManager::new(Arc::new(store)), dialog_id)
    }

    fn ytdl(dialog_id: i64) -> Task {
        Task::new(
            dialog_id,
            TaskPayload::Youtube(YoutubeDownload {
                link: "https://youtu.be/x".into(),
                user_name: "alice".into(),
            }),
        )
    }

    #[tokio::test]
    async fn reply_commands_persist_nothing() {
        let (store, tasks, dialog_id) = setup("ping").await;
        assert_eq!(tasks.process_dialog_begin(dialog_id).await.unwrap(), "Pong");
        assert!(store.tasks().await.is_empty());
    }

    #[tokio::test]
    async fn routed_command_queues_one_task() {
        let (store, tasks, dialog_id) = setup("/y2d https://youtube.com/watch?v=X").await;
        let ack = tasks.process_dialog_begin(dialog_id).await.unwrap();
        assert_eq!(ack, "task ytd created");

        let queued = store.tasks().await;
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].dialog_id, dialog_id);
        assert_eq!(queued[0].status, TaskStatus::Create);
        assert_eq!(
            queued[0].payload,
            TaskPayload::Youtube(YoutubeDownload {
                link: "https://youtube.com/watch?v=X".into(),
                user_name: "alice".into(),
            })
        );
    }

    #[tokio::test]
    async fn router_errors_are_user_text() {
        let (store, tasks, dialog_id) = setup("/y2d https://vimeo.com/1").await;
        let err = tasks.process_dialog_begin(dialog_id).await.unwrap_err();
        assert_eq!(err.to_string(), "host: vimeo.com not youtube");
        assert!(store.tasks().await.is_empty());

        let (_, tasks, dialog_id) = setup("weather today").await;
        let err = tasks.process_dialog_begin(dialog_id).await.unwrap_err();
        assert_eq!(err.to_string(), "command not found");
    }

    #[tokio::test]
    async fn begin_rejects_closed_or_multi_message_dialogs() {
        let (store, tasks, dialog_id) = setup("ping").await;
        let mut dialog = store.get_dialog(dialog_id).await.unwrap();
        dialog.status = DialogStatus::Close;
        store.update_dialog(&dialog).await.unwrap();
        let err = tasks.process_dialog_begin(dialog_id).await.unwrap_err();
        assert_eq!(err.to_string(), "wrong dialog status");

        dialog.status = DialogStatus::Begin;
        dialog.messages.push(message("again"));
        store.update_dialog(&dialog).await.unwrap();
        let err = tasks.process_dialog_begin(dialog_id).await.unwrap_err();
        assert_eq!(err.to_string(), "wrong number of messages");
    }

    #[tokio::test]
    async fn begin_on_missing_dialog_names_the_step() {
        let (_, tasks, _) = setup("ping").await;
        let err = tasks.process_dialog_begin(99).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "processDialogBegin getDialog: dialog 99 not found"
        );
    }

    #[tokio::test]
    async fn add_task_validates_type_and_dialog() {
        let (_, tasks, dialog_id) = setup("ping").await;
        let err = tasks.add_task(ytdl(0)).await.unwrap_err();
        assert_eq!(err.to_string(), "task must reference a dialog");

        let undefined = Task::new(
            dialog_id,
            TaskPayload::HealthCheck(HealthCheck {
                target: TaskType::Undefined,
            }),
        );
        let err = tasks.add_task(undefined).await.unwrap_err();
        assert_eq!(err.to_string(), "invalid task type");
    }

    #[tokio::test]
    async fn add_task_always_starts_in_create() {
        let (store, tasks, dialog_id) = setup("ping").await;
        let mut task = ytdl(dialog_id);
        task.status = TaskStatus::Done;
        let id = tasks.add_task(task).await.unwrap();
        assert_eq!(store.get_task(id).await.unwrap().status, TaskStatus::Create);
    }

    #[tokio::test]
    async fn claim_empty_then_once() {
        let (_, tasks, dialog_id) = setup("ping").await;
        assert!(tasks.claim_task(TaskType::Youtube).await.unwrap().is_none());
        assert_eq!(
            TaskEnvelope::from(tasks.claim_task(TaskType::Youtube).await.unwrap()).id,
            0
        );

        let id = tasks.add_task(ytdl(dialog_id)).await.unwrap();
        let claimed = tasks.claim_task(TaskType::Youtube).await.unwrap().unwrap();
        assert_eq!(claimed.id, id);
        assert_eq!(claimed.status, TaskStatus::Sended);
        assert!(tasks.claim_task(TaskType::Youtube).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn claim_rejects_undefined_type() {
        let (_, tasks, _) = setup("ping").await;
        assert!(matches!(
            tasks.claim_task(TaskType::Undefined).await,
            Err(CourierError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn done_without_text_closes_dialog_only() {
        let (store, tasks, dialog_id) = setup("ping").await;
        let id = tasks.add_task(ytdl(dialog_id)).await.unwrap();
        tasks.claim_task(TaskType::Youtube).await.unwrap();

        tasks.report_task(id, TaskStatus::Done, "").await.unwrap();
        assert_eq!(
            store.get_dialog(dialog_id).await.unwrap().status,
            DialogStatus::Close
        );
        assert_eq!(store.get_task(id).await.unwrap().status, TaskStatus::Done);
        assert_eq!(store.tasks().await.len(), 1);
    }

    #[tokio::test]
    async fn error_with_text_queues_a_reply() {
        let (store, tasks, dialog_id) = setup("ping").await;
        let id = tasks.add_task(ytdl(dialog_id)).await.unwrap();
        tasks.claim_task(TaskType::Youtube).await.unwrap();

        tasks.report_task(id, TaskStatus::Error, "boom").await.unwrap();
        assert_eq!(
            store.get_dialog(dialog_id).await.unwrap().status,
            DialogStatus::Error
        );

        let reply = tasks.claim_task(TaskType::Message).await.unwrap().unwrap();
        assert_eq!(reply.dialog_id, dialog_id);
        assert_eq!(
            reply.payload,
            TaskPayload::Message(OutboundMessage {
                text: "boom".into(),
                chat_id: 42,
                reply_message_id: 7,
            })
        );
        assert!(tasks.claim_task(TaskType::Message).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reply_reports_never_spawn_replies() {
        let (store, tasks, dialog_id) = setup("ping").await;
        let reply = Task::new(
            dialog_id,
            TaskPayload::Message(OutboundMessage {
                text: "hi".into(),
                chat_id: 42,
                reply_message_id: 7,
            }),
        );
        let id = tasks.add_task(reply).await.unwrap();

        tasks.report_task(id, TaskStatus::Done, "delivered").await.unwrap();
        assert_eq!(store.tasks().await.len(), 1);
    }

    #[tokio::test]
    async fn sended_reports_are_no_ops() {
        let (store, tasks, dialog_id) = setup("ping").await;
        let id = tasks.add_task(ytdl(dialog_id)).await.unwrap();

        for _ in 0..3 {
            tasks.report_task(id, TaskStatus::Sended, "text").await.unwrap();
        }
        assert_eq!(store.get_task(id).await.unwrap().status, TaskStatus::Sended);
        assert_eq!(
            store.get_dialog(dialog_id).await.unwrap().status,
            DialogStatus::Begin
        );
        assert_eq!(store.tasks().await.len(), 1);

        tasks.report_task(id, TaskStatus::Done, "").await.unwrap();
        tasks.report_task(id, TaskStatus::Sended, "").await.unwrap();
        assert_eq!(store.get_task(id).await.unwrap().status, TaskStatus::Done);
    }

    #[tokio::test]
    async fn stale_claim_marker_cannot_undo_a_final_report() {
        let (store, tasks, dialog_id) = setup("ping").await;
        let id = tasks.add_task(ytdl(dialog_id)).await.unwrap();
        let read_before_done = store.tasks().await[0].clone();

        tasks.report_task(id, TaskStatus::Done, "saved").await.unwrap();
        store.serve_stale_read(read_before_done).await;
        tasks.report_task(id, TaskStatus::Sended, "").await.unwrap();

        let all = store.tasks().await;
        assert_eq!(all[0].status, TaskStatus::Done);
        assert_eq!(all.len(), 2, "exactly one reply queued");
    }

    #[tokio::test]
    async fn racing_final_reports_queue_one_reply() {
        let (store, tasks, dialog_id) = setup("ping").await;
        let id = tasks.add_task(ytdl(dialog_id)).await.unwrap();
        let claimed = tasks.claim_task(TaskType::Youtube).await.unwrap().unwrap();

        tasks.report_task(id, TaskStatus::Done, "first").await.unwrap();
        store.serve_stale_read(claimed).await;
        let err = tasks
            .report_task(id, TaskStatus::Error, "second")
            .await
            .unwrap_err();
        assert!(matches!(err, CourierError::InvalidState(_)), "{err}");

        let replies: Vec<_> = store
            .tasks()
            .await
            .into_iter()
            .filter(|t| t.task_type() == TaskType::Message)
            .collect();
        assert_eq!(replies.len(), 1);
        assert_eq!(store.tasks().await[0].status, TaskStatus::Done);
    }

    #[tokio::test]
    async fn invalid_reports_are_rejected() {
        let (_, tasks, dialog_id) = setup("ping").await;
        let id = tasks.add_task(ytdl(dialog_id)).await.unwrap();

        assert!(matches!(
            tasks.report_task(id, TaskStatus::Create, "").await,
            Err(CourierError::InvalidInput(_))
        ));
        tasks.report_task(id, TaskStatus::Done, "").await.unwrap();
        assert!(matches!(
            tasks.report_task(id, TaskStatus::Error, "").await,
            Err(CourierError::InvalidState(_))
        ));
        let err = tasks.report_task(404, TaskStatus::Done, "").await.unwrap_err();
        assert!(matches!(err, CourierError::NotFound { entity: "task", id: 404, .. }));
        assert_eq!(err.to_string(), "reportTask getTask: task 404 not found");
    }

    #[tokio::test]
    async fn terminal_dialog_is_left_alone_but_reply_still_sent() {
        let (store, tasks, dialog_id) = setup("ping").await;
        let first = tasks.add_task(ytdl(dialog_id)).await.unwrap();
        let second = tasks.add_task(ytdl(dialog_id)).await.unwrap();

        tasks.report_task(first, TaskStatus::Error, "").await.unwrap();
        tasks.report_task(second, TaskStatus::Done, "done").await.unwrap();
        assert_eq!(
            store.get_dialog(dialog_id).await.unwrap().status,
            DialogStatus::Error
        );
        assert!(tasks.claim_task(TaskType::Message).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn store_failures_carry_report_context() {
        let (store, tasks, dialog_id) = setup("ping").await;
        let id = tasks.add_task(ytdl(dialog_id)).await.unwrap();
        store.fail_on("get_dialog").await;

        let err = tasks.report_task(id, TaskStatus::Done, "").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "reportTask getDialog get_dialog: injected failure"
        );
    }
}

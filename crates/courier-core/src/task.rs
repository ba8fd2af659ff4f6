// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tasks and their typed payloads.
//!
//! A task's type tag is never stored independently of its payload: it is
//! derived from the active [`TaskPayload`] variant, so a task can only ever
//! carry the fields of its own kind.
//!
//! On the wire a payload is an object with exactly one key naming the
//! variant (`{"ytdl": {...}}`), the shape the existing pollers read.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::{TaskStatus, TaskType};

/// A reply to deliver to a chat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub text: String,
    pub chat_id: i64,
    pub reply_message_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeDownload {
    pub link: String,
    pub user_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NoteCommand {
    AddDiary,
    AddInbox,
    ReadInbox,
    Pull,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteOperation {
    pub command: NoteCommand,
    #[serde(default)]
    pub add_text: String,
}

/// Transmission download folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TorrentFolder {
    Movie,
    Shows,
    Cartoon,
    Audiobook,
    AudiobookP,
    CartoonS,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TorrentOperation {
    Add {
        folder_path: TorrentFolder,
        torrent_url: String,
    },
    Del {
        torrent_id: i64,
    },
    List,
}

/// Download-station category on the NAS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NasCategory {
    Movie,
    Cartoon,
    Shows,
    Audiobook,
    Other,
    ShowsCartoons,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum NasOperation {
    Add {
        category: NasCategory,
        torrent_url: String,
    },
    List,
    Delete {
        task_id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinanceCommand {
    Run,
    Load,
    Transactions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceOperation {
    pub command: FinanceCommand,
}

/// A liveness probe routed to one worker's queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub target: TaskType,
}

/// The work a task carries, one variant per worker kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPayload {
    #[serde(rename = "msg")]
    Message(OutboundMessage),
    #[serde(rename = "ytdl")]
    Youtube(YoutubeDownload),
    #[serde(rename = "tn")]
    Note(NoteOperation),
    #[serde(rename = "tr")]
    Torrent(TorrentOperation),
    #[serde(rename = "syno")]
    Nas(NasOperation),
    #[serde(rename = "fin")]
    Finance(FinanceOperation),
    #[serde(rename = "health")]
    HealthCheck(HealthCheck),
}

impl TaskPayload {
    /// The queue this payload belongs to.
    pub fn task_type(&self) -> TaskType {
        match self {
            TaskPayload::Message(_) => TaskType::Message,
            TaskPayload::Youtube(_) => TaskType::Youtube,
            TaskPayload::Note(_) => TaskType::Note,
            TaskPayload::Torrent(_) => TaskType::Torrent,
            TaskPayload::Nas(_) => TaskType::Nas,
            TaskPayload::Finance(_) => TaskType::Finance,
            TaskPayload::HealthCheck(probe) => probe.target,
        }
    }

    /// Serializes the payload into the opaque blob kept by the store.
    pub fn to_blob(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_blob(blob: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(blob)
    }
}

/// One unit of work for an external poller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TaskEnvelope", try_from = "TaskEnvelope")]
pub struct Task {
    pub id: i64,
    pub dialog_id: i64,
    pub status: TaskStatus,
    pub payload: TaskPayload,
}

impl Task {
    /// A new, not yet persisted task in `Create`.
    pub fn new(dialog_id: i64, payload: TaskPayload) -> Self {
        Self {
            id: 0,
            dialog_id,
            status: TaskStatus::Create,
            payload,
        }
    }

    pub fn task_type(&self) -> TaskType {
        self.payload.task_type()
    }
}

/// Wire form of a task, as exchanged with pollers.
///
/// Unlike [`Task`], an envelope may be the zero-identity sentinel (`id == 0`,
/// no payload) that signals "no work available".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEnvelope {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub dialog_id: i64,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(rename = "type", default)]
    pub task_type: TaskType,
    #[serde(default)]
    pub task_data: Option<TaskPayload>,
}

impl TaskEnvelope {
    /// The "no work available" sentinel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Converts the envelope into a task; `None` for the sentinel.
    pub fn into_task(self) -> Result<Option<Task>, String> {
        if self.id == 0 {
            return Ok(None);
        }
        Task::try_from(self).map(Some)
    }
}

impl From<Task> for TaskEnvelope {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            dialog_id: task.dialog_id,
            status: task.status,
            task_type: task.task_type(),
            task_data: Some(task.payload),
        }
    }
}

impl From<Option<Task>> for TaskEnvelope {
    fn from(task: Option<Task>) -> Self {
        task.map(TaskEnvelope::from).unwrap_or_default()
    }
}

impl TryFrom<TaskEnvelope> for Task {
    type Error = String;

    fn try_from(envelope: TaskEnvelope) -> Result<Self, Self::Error> {
        let payload = envelope
            .task_data
            .ok_or_else(|| format!("task {} has no taskData", envelope.id))?;
        if payload.task_type() != envelope.task_type {
            return Err(format!(
                "task {} declares type {} but carries a {} payload",
                envelope.id,
                envelope.task_type.code(),
                payload.task_type().code()
            ));
        }
        Ok(Task {
            id: envelope.id,
            dialog_id: envelope.dialog_id,
            status: envelope.status,
            payload,
        })
    }
}

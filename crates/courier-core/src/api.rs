// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON bodies exchanged between the gateway, the chat bridge and pollers.
//!
//! Field names are camelCase. Every response carries `status` (`"OK"`,
//! `"no tasks"` or `"error"`) and an `error` string that is empty on success.

use serde::{Deserialize, Serialize};

use crate::task::{OutboundMessage, TaskEnvelope};
use crate::types::{TaskStatus, TaskType};

/// `status` of a successful response.
pub const STATUS_OK: &str = "OK";

/// `status` of a claim that found nothing pending.
pub const STATUS_NO_TASKS: &str = "no tasks";

/// `status` of a failed request.
pub const STATUS_ERROR: &str = "error";

/// Body of POST /get-task/.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTaskRequest {
    pub task_type: TaskType,
}

/// Body of POST /report-task/.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTaskRequest {
    pub task_id: i64,
    pub status: TaskStatus,
    #[serde(default)]
    pub text_msg: String,
}

/// Response of POST /add-msg/: the reply addressed to the inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMsgResponse {
    pub task_msg: OutboundMessage,
    pub status: String,
    #[serde(default)]
    pub error: String,
}

/// Response of POST /get-task/.
///
/// `data` is the zero-identity task when nothing is pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTaskResponse {
    pub data: TaskEnvelope,
    pub status: String,
    #[serde(default)]
    pub error: String,
}

/// Response of calls that only acknowledge, and of every failed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub error: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: STATUS_OK.to_string(),
            error: String::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            error: message.into(),
        }
    }
}

/// Response of POST /admin/delete-all/.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAllResponse {
    pub status: String,
    #[serde(default)]
    pub error: String,
    pub tasks: u64,
    pub dialogs: u64,
}

/// Response of GET /health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub name: String,
    pub version: String,
    pub uptime_secs: u64,
    pub storage: String,
}

// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the courier gateway.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use courier_config::model::ClientConfig;
use courier_core::api::{
    AddMsgResponse, DeleteAllResponse, GetTaskRequest, GetTaskResponse, ReportTaskRequest,
    StatusResponse,
};
use courier_core::{CourierError, Message, Task, TaskStatus, TaskType};

const ADD_MSG_PATH: &str = "/add-msg/";
const GET_TASK_PATH: &str = "/get-task/";
const REPORT_TASK_PATH: &str = "/report-task/";
const DELETE_ALL_PATH: &str = "/admin/delete-all/";

/// Talks to a running gateway on behalf of the chat bridge or a poller.
#[derive(Debug, Clone)]
pub struct CourierClient {
    client: reqwest::Client,
    base_url: String,
}

impl CourierClient {
    /// Creates a client for the gateway at `base_url`.
    ///
    /// `secret` is sent in the `secret` header of every request.
    pub fn new(
        base_url: &str,
        secret: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, CourierError> {
        let mut headers = HeaderMap::new();
        if let Some(secret) = secret {
            let value = HeaderValue::from_str(secret)
                .map_err(|e| CourierError::Config(format!("invalid secret header value: {e}")))?;
            headers.insert("secret", value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| CourierError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, CourierError> {
        Self::new(
            &config.base_url,
            config.secret.as_deref(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Posts an inbound chat message; returns the reply to deliver.
    pub async fn add_message(&self, message: &Message) -> Result<AddMsgResponse, CourierError> {
        self.post(ADD_MSG_PATH, message, "addmsg").await
    }

    /// Claims the oldest pending task of `task_type`, `None` when idle.
    pub async fn claim_task(&self, task_type: TaskType) -> Result<Option<Task>, CourierError> {
        let response: GetTaskResponse = self
            .post(GET_TASK_PATH, &GetTaskRequest { task_type }, "getTask")
            .await?;
        response.data.into_task().map_err(|e| CourierError::Transport {
            message: format!("getTask bad task: {e}"),
            source: None,
        })
    }

    pub async fn report_task(
        &self,
        task_id: i64,
        status: TaskStatus,
        text_msg: &str,
    ) -> Result<(), CourierError> {
        let request = ReportTaskRequest {
            task_id,
            status,
            text_msg: text_msg.to_string(),
        };
        let _: StatusResponse = self.post(REPORT_TASK_PATH, &request, "reportTask").await?;
        Ok(())
    }

    /// Purges every task and dialog on the server.
    pub async fn delete_all(&self) -> Result<DeleteAllResponse, CourierError> {
        self.post(DELETE_ALL_PATH, &serde_json::json!({}), "deleteAll")
            .await
    }

    async fn post<Req, Res>(&self, path: &str, body: &Req, op: &str) -> Result<Res, CourierError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| CourierError::Transport {
                message: format!("{op} request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(%status, path, "gateway response received");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<StatusResponse>(&body)
                .map(|r| r.error)
                .unwrap_or(body);
            return Err(CourierError::Transport {
                message: format!("{op} returned {status}: {detail}"),
                source: None,
            });
        }

        response.json().await.map_err(|e| CourierError::Transport {
            message: format!("{op} bad response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

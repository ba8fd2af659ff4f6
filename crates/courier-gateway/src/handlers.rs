// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles POST /add-msg/, /get-task/, /report-task/, /admin/delete-all/
//! and GET /health.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use courier_core::api::{
    AddMsgResponse, DeleteAllResponse, GetTaskRequest, GetTaskResponse, HealthResponse,
    ReportTaskRequest, STATUS_NO_TASKS, STATUS_OK, StatusResponse,
};
use courier_core::{CourierError, HealthStatus, Message, PluginAdapter, TaskEnvelope};
use courier_engine::{IncomingError, purge_all};

use crate::server::GatewayState;

/// An error rendered as `{"status": "error", "error": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn from_core(context: &str, err: CourierError) -> Self {
        let status = match &err {
            CourierError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CourierError::NotFound { .. } => StatusCode::NOT_FOUND,
            CourierError::InvalidState(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, format!("{context} err: {err}"))
    }

    fn from_rejection(context: &str, rejection: JsonRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            format!("body {context} decode err: {}", rejection.body_text()),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::info!(status = %self.status, error = %self.message, "handler error");
        (self.status, Json(StatusResponse::error(self.message))).into_response()
    }
}

/// POST /add-msg/
///
/// Runs an inbound chat message through the assistant and returns the
/// reply addressed to it.
pub async fn post_add_msg(
    State(state): State<GatewayState>,
    body: Result<Json<Message>, JsonRejection>,
) -> Result<Json<AddMsgResponse>, ApiError> {
    let Json(message) = body.map_err(|e| ApiError::from_rejection("addMsg", e))?;
    let reply = state
        .assistant
        .handle_incoming(message)
        .await
        .map_err(|e| match e {
            IncomingError::BadRequest(msg) => ApiError::new(StatusCode::BAD_REQUEST, msg),
        })?;

    Ok(Json(AddMsgResponse {
        task_msg: reply,
        status: STATUS_OK.to_string(),
        error: String::new(),
    }))
}

/// POST /get-task/
///
/// Claims the oldest pending task of the requested type.
pub async fn post_get_task(
    State(state): State<GatewayState>,
    body: Result<Json<GetTaskRequest>, JsonRejection>,
) -> Result<Json<GetTaskResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::from_rejection("GetTask", e))?;
    let task = state
        .assistant
        .tasks()
        .claim_task(request.task_type)
        .await
        .map_err(|e| ApiError::from_core("getTask", e))?;

    let status = if task.is_some() {
        STATUS_OK
    } else {
        STATUS_NO_TASKS
    };
    Ok(Json(GetTaskResponse {
        data: TaskEnvelope::from(task),
        status: status.to_string(),
        error: String::new(),
    }))
}

/// POST /report-task/
pub async fn post_report_task(
    State(state): State<GatewayState>,
    body: Result<Json<ReportTaskRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::from_rejection("ReportTask", e))?;
    state
        .assistant
        .tasks()
        .report_task(request.task_id, request.status, &request.text_msg)
        .await
        .map_err(|e| ApiError::from_core("reportTask", e))?;

    Ok(Json(StatusResponse::ok()))
}

/// POST /admin/delete-all/
///
/// Deletes every task and dialog.
pub async fn post_delete_all(
    State(state): State<GatewayState>,
) -> Result<Json<DeleteAllResponse>, ApiError> {
    let report = purge_all(state.store.as_ref())
        .await
        .map_err(|e| ApiError::from_core("deleteAll", e))?;

    Ok(Json(DeleteAllResponse {
        status: STATUS_OK.to_string(),
        error: String::new(),
        tasks: report.tasks,
        dialogs: report.dialogs,
    }))
}

/// GET /health
///
/// Unauthenticated. Returns 503 when the store is unhealthy.
pub async fn get_health(State(state): State<GatewayState>) -> Response {
    let storage = match state.store.health_check().await {
        Ok(status) => status,
        Err(e) => HealthStatus::Unhealthy(e.to_string()),
    };
    let (code, status, detail) = match storage {
        HealthStatus::Healthy => (StatusCode::OK, STATUS_OK, "healthy".to_string()),
        HealthStatus::Degraded(reason) => (StatusCode::OK, "degraded", reason),
        HealthStatus::Unhealthy(reason) => {
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", reason)
        }
    };

    let body = HealthResponse {
        status: status.to_string(),
        name: state.health.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        storage: detail,
    };
    (code, Json(body)).into_response()
}

// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/health <worker>`: send a liveness probe through one worker's queue.

use std::str::FromStr;

use courier_core::{HealthCheck, TaskPayload, TaskType};

use super::arg;
use crate::error::RouteError;
use crate::route::Route;

pub fn build(words: &[&str]) -> Result<Route, RouteError> {
    let name = arg(words, 1).ok_or(RouteError::missing("health", "worker"))?;
    let target = TaskType::from_str(name)
        .ok()
        .filter(|t| TaskType::WORKERS.contains(t))
        .ok_or_else(|| RouteError::UnknownWorker(name.to_string()))?;

    Ok(Route::Enqueue {
        payload: TaskPayload::HealthCheck(HealthCheck { target }),
        ack: "task health created",
    })
}

// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch from canonical tokens to a reply or a task payload.

use courier_core::{Message, TaskPayload};
use tracing::debug;

use crate::commands::{finance, health, nas, note, torrent, youtube};
use crate::error::RouteError;
use crate::help;
use crate::normalize::normalize;

/// Outcome of routing one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Answer directly; nothing is persisted.
    Reply(String),
    /// Persist `payload` as a new task, then answer with `ack`.
    Enqueue {
        payload: TaskPayload,
        ack: &'static str,
    },
}

impl Route {
    pub(crate) fn reply(text: &str) -> Self {
        Route::Reply(text.to_string())
    }
}

/// Routes a message using its effective text (text, falling back to caption).
pub fn route(message: &Message) -> Result<Route, RouteError> {
    let text = message.effective_text().ok_or(RouteError::EmptyText)?;
    route_text(text, &message.user_name, &message.file_url)
}

/// Routes raw command text on behalf of `user_name`.
///
/// `file_url` is the URL of a file attached to the message, or empty.
pub fn route_text(text: &str, user_name: &str, file_url: &str) -> Result<Route, RouteError> {
    if text.is_empty() {
        return Err(RouteError::EmptyText);
    }
    let tokens: Vec<&str> = text.split(' ').collect();
    let words = normalize(&tokens);
    debug!(command = words[0], tokens = words.len(), "routing command");

    match words[0] {
        "/help" => Ok(Route::reply(help::COMMON)),
        "/ping" => Ok(Route::reply("Pong")),
        "/y2d" => youtube::build(&words, user_name),
        "/torrent" => torrent::build(&words, file_url),
        "/note" => note::build(&words),
        "/ds" => nas::build(&words, file_url),
        "/finance" => finance::build(&words),
        "/health" => health::build(&words),
        _ => Err(RouteError::CommandNotFound),
    }
}

// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validation failures produced while routing a message.

use thiserror::Error;

/// Why a message could not be turned into a reply or a task.
///
/// The `Display` text is sent back to the chat as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("text is empty")]
    EmptyText,

    /// The first token names no known command.
    #[error("command not found")]
    CommandNotFound,

    /// A known command received a sub-command it does not have.
    #[error("unknown command")]
    UnknownSubcommand,

    /// A required token or attachment is absent.
    #[error("for {command} need {what}")]
    Missing {
        command: &'static str,
        what: &'static str,
    },

    #[error("can't parse url {0}")]
    InvalidUrl(String),

    #[error("host: {0} not youtube")]
    NotYoutube(String),

    #[error("wrong label")]
    WrongLabel,

    #[error("for tr del id is not an int")]
    IdNotAnInt,

    #[error("list command does not have arguments")]
    ListTakesNoArguments,

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown worker: {0}")]
    UnknownWorker(String),
}

impl RouteError {
    pub(crate) fn missing(command: &'static str, what: &'static str) -> Self {
        Self::Missing { command, what }
    }
}

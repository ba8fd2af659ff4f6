// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the courier task hub.
//!
//! This crate provides the domain model (messages, dialogs, typed tasks),
//! the shared error type, and the persistence contract every store
//! implements. It performs no I/O of its own.

pub mod api;
pub mod dialog;
pub mod error;
pub mod task;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use dialog::{Dialog, Message};
pub use error::CourierError;
pub use task::{
    FinanceCommand, FinanceOperation, HealthCheck, NasCategory, NasOperation, NoteCommand,
    NoteOperation, OutboundMessage, Task, TaskEnvelope, TaskPayload, TorrentFolder,
    TorrentOperation, YoutubeDownload,
};
pub use traits::{PluginAdapter, TaskStore};
pub use types::{DialogStatus, HealthStatus, MessageType, TaskStatus, TaskType};

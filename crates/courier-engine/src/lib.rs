// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialog and task lifecycle engine for courier.
//!
//! The engine sits between the transport and the store:
//!
//! - [`DialogManager`] opens one dialog per inbound message.
//! - [`TaskManager`] classifies a begun dialog through the router, queues
//!   the resulting task, hands tasks to pollers and folds their reports
//!   back into dialog status and reply tasks.
//! - [`Assistant`] is the single entry point for inbound chat messages.
//!
//! The engine keeps no state between calls; everything is re-read from the
//! [`TaskStore`](courier_core::TaskStore).

pub mod access;
pub mod admin;
pub mod assistant;
pub mod dialog;
pub mod shutdown;
pub mod task;

pub use access::AccessPolicy;
pub use admin::{PurgeReport, purge_all};
pub use assistant::{Assistant, IncomingError, IncomingReply};
pub use dialog::DialogManager;
pub use task::TaskManager;

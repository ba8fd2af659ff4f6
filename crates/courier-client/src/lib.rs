// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client side of the courier gateway.
//!
//! [`CourierClient`] calls the gateway endpoints; [`listen_tasks`] is the
//! poll/work/report loop an out-of-process worker runs around its own
//! [`TaskWorker`].

pub mod client;
pub mod poller;

pub use client::CourierClient;
pub use poller::{TaskWorker, listen_tasks, poll_once};

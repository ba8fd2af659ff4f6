// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for courier.
//!
//! Exposes the engine's boundary operations as JSON-over-HTTP endpoints:
//! the chat bridge posts inbound messages to `/add-msg/`, pollers claim and
//! report tasks through `/get-task/` and `/report-task/`. Every route but
//! `/health` requires one of the configured shared secrets.

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use server::{GatewayState, HealthState, build_router, serve, start_server};

// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command routing for inbound chat messages.
//!
//! This crate provides:
//! - [`normalize`]: alias expansion into a canonical token sequence
//! - [`route`]: dispatch plus per-command validation, yielding a [`Route`]
//!
//! The router is pure. It never touches persistence; a [`Route::Enqueue`]
//! is handed to the task lifecycle, which performs the single insert.

pub mod commands;
pub mod error;
pub mod help;
pub mod normalize;
pub mod route;

pub use error::RouteError;
pub use normalize::normalize;
pub use route::{Route, route, route_text};

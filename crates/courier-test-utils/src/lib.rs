// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for courier integration tests.
//!
//! Provides stores and harness infrastructure for fast, deterministic,
//! CI-runnable tests without a running gateway.
//!
//! # Components
//!
//! - [`MemoryStore`] - In-memory [`TaskStore`](courier_core::TaskStore) with failure injection
//! - [`TestHarness`] - Temp-file SQLite store plus a matching config

pub mod harness;
pub mod memory_store;

pub use harness::TestHarness;
pub use memory_store::MemoryStore;

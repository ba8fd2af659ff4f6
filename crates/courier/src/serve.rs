// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `courier serve` command implementation.
//!
//! Opens the SQLite store, wires the assistant into the HTTP gateway and
//! serves until SIGINT or SIGTERM, then checkpoints the database.

use std::sync::Arc;

use courier_config::CourierConfig;
use courier_core::{CourierError, TaskStore};
use courier_engine::{AccessPolicy, Assistant, shutdown};
use courier_gateway::{GatewayState, start_server};
use courier_storage::SqliteStorage;
use tracing::info;

/// Runs the `courier serve` command.
pub async fn run_serve(config: CourierConfig) -> Result<(), CourierError> {
    if let Err(errors) = courier_config::validate_serve_requirements(&config) {
        courier_config::render_errors(&errors);
        return Err(CourierError::Config(
            "serve needs server.secrets and access.allowed_users".into(),
        ));
    }

    info!(name = %config.service.name, "starting courier serve");

    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;
    let store: Arc<dyn TaskStore> = storage.clone();

    let access = AccessPolicy::from_config(&config.access);
    let assistant = Assistant::new(store.clone(), access);
    let state = GatewayState::new(assistant, store, &config.service.name);

    let cancel = shutdown::install_signal_handler();
    let served = start_server(&config.server, state, cancel).await;

    info!("closing storage");
    let closed = storage.close().await;
    served?;
    closed
}

// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialog lifecycle: one new dialog per inbound message.

use std::sync::Arc;

use courier_core::{CourierError, Dialog, Message, TaskStore};
use tracing::debug;

/// Opens dialogs for inbound messages.
#[derive(Clone)]
pub struct DialogManager {
    store: Arc<dyn TaskStore>,
}

impl DialogManager {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Persists a new dialog in `Begin` holding only `message`.
    ///
    /// Never reuses an open dialog with the same key; every call inserts a row.
    pub async fn create(&self, message: Message) -> Result<i64, CourierError> {
        let dialog = Dialog::begin(message);
        let id = self
            .store
            .add_dialog(&dialog)
            .await
            .map_err(|e| e.context("createDialog"))?;
        debug!(dialog_id = id, key = %dialog.key, "dialog created");
        Ok(id)
    }
}

// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry point for inbound chat messages.

use std::sync::Arc;

use courier_core::{CourierError, Message, MessageType, OutboundMessage, TaskStore};
use tracing::{debug, warn};

use crate::access::AccessPolicy;
use crate::dialog::DialogManager;
use crate::task::TaskManager;

/// The text sent back to the chat, addressed to the inbound message.
pub type IncomingReply = OutboundMessage;

/// An inbound message the transport should refuse outright.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IncomingError {
    #[error("bad request: {0}")]
    BadRequest(String),
}

/// Wires inbound messages through dialog creation and routing.
#[derive(Clone)]
pub struct Assistant {
    dialogs: DialogManager,
    tasks: TaskManager,
    access: AccessPolicy,
}

impl Assistant {
    pub fn new(store: Arc<dyn TaskStore>, access: AccessPolicy) -> Self {
        Self {
            dialogs: DialogManager::new(store.clone()),
            tasks: TaskManager::new(store),
            access,
        }
    }

    /// Task lifecycle operations shared with the poller endpoints.
    pub fn tasks(&self) -> &TaskManager {
        &self.tasks
    }

    /// Handles one inbound message and produces the reply to send back.
    ///
    /// Only a message without chat id or user name is refused. Every other
    /// outcome, including internal failures, is rendered as reply text.
    pub async fn handle_incoming(
        &self,
        mut message: Message,
    ) -> Result<IncomingReply, IncomingError> {
        if message.chat_id == 0 || message.user_name.is_empty() {
            return Err(IncomingError::BadRequest(
                "message needs chatId and userName".into(),
            ));
        }

        let mut reply = IncomingReply {
            text: String::new(),
            chat_id: message.chat_id,
            reply_message_id: message.message_id,
        };

        if !self.access.allows(&message.user_name) {
            warn!(user = %message.user_name, "message from unknown user");
            reply.text = format!("I don't answer to user {}", message.user_name);
            return Ok(reply);
        }

        message.message_type = MessageType::User;
        reply.text = match self.route_new_dialog(message).await {
            Ok(text) => text,
            Err(e) => {
                debug!(error = %e, "incoming message failed");
                e.to_string()
            }
        };
        Ok(reply)
    }

    async fn route_new_dialog(&self, message: Message) -> Result<String, CourierError> {
        let dialog_id = self.dialogs.create(message).await?;
        self.tasks.process_dialog_begin(dialog_id).await
    }
}

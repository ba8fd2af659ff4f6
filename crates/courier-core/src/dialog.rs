// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound chat messages and the dialogs that wrap them.

use serde::{Deserialize, Serialize};

use crate::types::{DialogStatus, MessageType};

/// One inbound chat event, as posted by the chat bridge.
///
/// Never mutated after it is embedded into a [`Dialog`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub user_name: String,
    pub message_id: i64,
    #[serde(rename = "replyToMessageID")]
    pub reply_to_message_id: i64,
    pub chat_id: i64,
    pub text: String,
    pub caption: String,
    pub file_url: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
}

impl Message {
    /// The text a command is read from: `text`, falling back to `caption`.
    ///
    /// Returns `None` when both are empty.
    pub fn effective_text(&self) -> Option<&str> {
        if !self.text.is_empty() {
            Some(&self.text)
        } else if !self.caption.is_empty() {
            Some(&self.caption)
        } else {
            None
        }
    }

    /// The non-unique key grouping dialogs of one user in one chat.
    pub fn dialog_key(&self) -> String {
        format!("{}-{}", self.chat_id, self.user_name)
    }
}

/// One conversation thread and its lifecycle status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialog {
    pub id: i64,
    pub key: String,
    #[serde(rename = "dialogStatus")]
    pub status: DialogStatus,
    pub messages: Vec<Message>,
}

impl Dialog {
    /// A fresh dialog in `Begin` holding just `message`.
    pub fn begin(message: Message) -> Self {
        Self {
            id: 0,
            key: message.dialog_key(),
            status: DialogStatus::Begin,
            messages: vec![message],
        }
    }

    /// The message that opened the dialog; replies are addressed to it.
    pub fn first_message(&self) -> Option<&Message> {
        self.messages.first()
    }

    /// Serializes the message sequence into the opaque blob stored by the store.
    pub fn messages_blob(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.messages)
    }

    /// Parses a message sequence blob written by [`Dialog::messages_blob`].
    ///
    /// An empty blob decodes to no messages.
    pub fn messages_from_blob(blob: &[u8]) -> Result<Vec<Message>, serde_json::Error> {
        if blob.is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_slice(blob)
    }
}

// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the courier task hub.

use thiserror::Error;

/// The primary error type used across the store contract and the engine.
///
/// `Display` output is shown to chat users verbatim when an inbound message
/// fails, so messages are kept short and lowercase.
#[derive(Debug, Error)]
pub enum CourierError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("{context}: {source}")]
    Storage {
        context: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A dialog or task lookup by identity found nothing.
    ///
    /// `context` holds the call-site prefix added by [`CourierError::context`],
    /// ending in `": "` when non-empty.
    #[error("{context}{entity} {id} not found")]
    NotFound {
        context: String,
        entity: &'static str,
        id: i64,
    },

    /// The caller supplied a value the operation cannot accept.
    #[error("{0}")]
    InvalidInput(String),

    /// A persisted record is in a state the operation does not allow.
    #[error("{0}")]
    InvalidState(String),

    /// HTTP transport errors between pollers and the gateway.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CourierError {
    /// A lookup of `entity` by `id` that matched no row.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound {
            context: String::new(),
            entity,
            id,
        }
    }

    /// Wraps any storage-level failure with the name of the operation that hit it.
    pub fn storage(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Storage {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Prefixes the error with call-site context, keeping the variant.
    ///
    /// Mirrors how every engine operation names itself in failures
    /// (`"reportTask getDialog: ..."`).
    pub fn context(self, ctx: &str) -> Self {
        match self {
            Self::Storage { context, source } => Self::Storage {
                context: format!("{ctx} {context}"),
                source,
            },
            Self::NotFound {
                context,
                entity,
                id,
            } => Self::NotFound {
                context: format!("{ctx}: {context}"),
                entity,
                id,
            },
            Self::InvalidInput(msg) => Self::InvalidInput(format!("{ctx}: {msg}")),
            Self::InvalidState(msg) => Self::InvalidState(format!("{ctx}: {msg}")),
            Self::Internal(msg) => Self::Internal(format!("{ctx}: {msg}")),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_displays_context_and_source() {
        let err = CourierError::storage("insert task", std::io::Error::other("disk full"));
        assert_eq!(err.to_string(), "insert task: disk full");
    }

    #[test]
    fn context_prefixes_storage_errors() {
        let err = CourierError::storage("getDialog", std::io::Error::other("locked"))
            .context("reportTask");
        assert_eq!(err.to_string(), "reportTask getDialog: locked");
    }

    #[test]
    fn context_keeps_not_found_variant() {
        let err = CourierError::not_found("dialog", 7).context("reportTask getDialog");
        assert!(matches!(
            err,
            CourierError::NotFound {
                entity: "dialog",
                id: 7,
                ..
            }
        ));
        assert_eq!(err.to_string(), "reportTask getDialog: dialog 7 not found");

        let nested = err.context("outer");
        assert_eq!(nested.to_string(), "outer: reportTask getDialog: dialog 7 not found");
    }

    #[test]
    fn bare_not_found_has_no_prefix() {
        assert_eq!(CourierError::not_found("task", 3).to_string(), "task 3 not found");
    }

    #[test]
    fn invalid_input_displays_bare_message() {
        let err = CourierError::InvalidInput("invalid task type".into());
        assert_eq!(err.to_string(), "invalid task type");
    }
}

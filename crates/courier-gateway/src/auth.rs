// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared-secret authentication middleware.
//!
//! A request is accepted when its `secret` header, or the token of an
//! `Authorization: Bearer <token>` header, equals any configured secret.
//! With no secret configured every request is rejected (fail-closed).

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::handlers::ApiError;

/// Secrets accepted by [`auth_middleware`].
#[derive(Clone, Default)]
pub struct AuthConfig {
    secrets: Arc<Vec<String>>,
}

impl AuthConfig {
    /// Blank secrets are ignored; they would match a missing header.
    pub fn new(secrets: &[String]) -> Self {
        Self {
            secrets: Arc::new(
                secrets
                    .iter()
                    .filter(|s| !s.trim().is_empty())
                    .cloned()
                    .collect(),
            ),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.secrets.is_empty()
    }

    fn accepts(&self, presented: &str) -> bool {
        self.secrets.iter().any(|s| s == presented)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secrets", &format_args!("[{} redacted]", self.secrets.len()))
            .finish()
    }
}

fn presented_secret(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get("secret").and_then(|v| v.to_str().ok());
    header.or_else(|| {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
    })
}

/// Rejects requests that do not carry a configured secret.
pub async fn auth_middleware(
    State(auth): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !auth.is_configured() {
        tracing::error!("gateway has no secrets configured -- rejecting request");
        return Err(ApiError::new(StatusCode::UNAUTHORIZED, "unauthorized"));
    }

    match presented_secret(request.headers()) {
        Some(secret) if auth.accepts(secret) => Ok(next.run(request).await),
        _ => {
            tracing::debug!(path = %request.uri().path(), "request rejected: bad secret");
            Err(ApiError::new(StatusCode::UNAUTHORIZED, "unauthorized"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn blank_secrets_do_not_count() {
        let auth = AuthConfig::new(&["".to_string(), "  ".to_string()]);
        assert!(!auth.is_configured());
    }

    #[test]
    fn secret_header_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer b"));
        assert_eq!(presented_secret(&headers), Some("b"));
        headers.insert("secret", HeaderValue::from_static("s"));
        assert_eq!(presented_secret(&headers), Some("s"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let auth = AuthConfig::new(&["hunter2".to_string()]);
        let debug = format!("{auth:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("1 redacted"));
    }
}

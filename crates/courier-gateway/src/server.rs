// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use courier_config::model::ServerConfig;
use courier_core::{CourierError, TaskStore};
use courier_engine::Assistant;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;

/// Data for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    pub start_time: Instant,
    pub service_name: String,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub assistant: Assistant,
    pub store: Arc<dyn TaskStore>,
    pub health: HealthState,
}

impl GatewayState {
    pub fn new(assistant: Assistant, store: Arc<dyn TaskStore>, service_name: &str) -> Self {
        Self {
            assistant,
            store,
            health: HealthState {
                start_time: Instant::now(),
                service_name: service_name.to_string(),
            },
        }
    }
}

/// Builds the gateway router.
///
/// - GET /health and /health/ (public)
/// - POST /add-msg/, /get-task/, /report-task/, /admin/delete-all/ (secret required)
///
/// `debug` adds request/response tracing.
pub fn build_router(state: GatewayState, auth: AuthConfig, debug: bool) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/health/", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/add-msg/", post(handlers::post_add_msg))
        .route("/get-task/", post(handlers::post_get_task))
        .route("/report-task/", post(handlers::post_report_task))
        .route("/admin/delete-all/", post(handlers::post_delete_all))
        .route_layer(axum_middleware::from_fn_with_state(auth, auth_middleware))
        .with_state(state);

    let app = Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(CorsLayer::permissive());

    if debug {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    }
}

/// Serves `app` on an already bound listener until `cancel` fires.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    cancel: CancellationToken,
) -> Result<(), CourierError> {
    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await
        .map_err(|e| CourierError::Transport {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })
}

/// Binds `host:port` from `config` and serves the gateway until `cancel` fires.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), CourierError> {
    let auth = AuthConfig::new(&config.secrets);
    if !auth.is_configured() {
        tracing::warn!("no server secrets configured, every API request will be rejected");
    }
    let app = build_router(state, auth, config.debug);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| CourierError::Transport {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway listening on {addr}");
    serve(listener, app, cancel).await?;
    tracing::info!("gateway stopped");
    Ok(())
}

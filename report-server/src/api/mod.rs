//! HTTP API
//!
//! | Path | Auth |
//! |------|------|
//! | GET /health | public |
//! | GET /reports/* | bearer token + report role |

pub mod health;
pub mod reports;

use std::time::Duration;

use axum::Router;
use http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// All routes, state not yet applied
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(reports::router(state))
}

/// Fully layered application, used by the listener and by oneshot tests
pub fn build_app(state: &ServerState) -> Router {
    let request_timeout = Duration::from_millis(state.config.request_timeout_ms);

    build_router(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            request_timeout,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone())
}

//! Utility module - shared helpers
//!
//! - [`AppError`] / [`ApiResponse`] - error and envelope types (from shared::error)
//! - [`time`] - business timezone conversions
//! - [`clock`] - injectable "now"
//! - [`logger`] - tracing subscriber setup

pub mod clock;
pub mod logger;
pub mod time;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use axum::Json;
use serde::Serialize;

/// Wrap data in the success envelope
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

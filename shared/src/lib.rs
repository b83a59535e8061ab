//! Shared types for the restaurant back-office report server
//!
//! Error types, the response envelope, the record models the analytics engine
//! reads and the report shapes it returns.

pub mod error;
pub mod models;
pub mod report;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};

use thiserror::Error;

use crate::core::ConfigError;
use crate::store::SnapshotError;

/// Failures that stop the server from starting or serving
///
/// Request-level failures use [`crate::utils::AppError`] instead.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("data snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

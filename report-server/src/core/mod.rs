//! Core module - configuration, state and startup errors
//!
//! - [`Config`] - environment configuration
//! - [`ServerState`] - shared handles for handlers and middleware
//! - [`Server`] - HTTP listener
//! - [`ServerError`] - startup / serve failures

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;

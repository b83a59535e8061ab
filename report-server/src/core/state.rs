use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::reports::ReportEngine;
use crate::store::{MemoryStore, Stores};
use crate::utils::clock::{Clock, SystemClock};

/// Server state - shared handles for handlers and middleware
///
/// | Field | Type | Notes |
/// |-------|------|-------|
/// | config | Config | immutable |
/// | engine | Arc<ReportEngine> | stores + calendar + clock |
/// | jwt_service | Arc<JwtService> | token validation |
///
/// Cloning is cheap; axum clones it per request.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub engine: Arc<ReportEngine>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Build state from explicit stores and clock
    pub fn new(config: Config, stores: Stores, clock: Arc<dyn Clock>) -> Self {
        let engine = ReportEngine::new(stores, config.engine_settings(), clock);
        let jwt_service = JwtService::with_config(config.jwt.clone());
        Self {
            config,
            engine: Arc::new(engine),
            jwt_service: Arc::new(jwt_service),
        }
    }

    /// Build state for the binary: in-memory store from `DATA_FILE`, system clock
    pub fn initialize(config: &Config) -> Result<Self> {
        let store = match &config.data_file {
            Some(path) => MemoryStore::from_file(path)?,
            None => {
                tracing::warn!("DATA_FILE not set, serving reports over an empty store");
                MemoryStore::empty()
            }
        };

        Ok(Self::new(
            config.clone(),
            Stores::from_memory(Arc::new(store)),
            Arc::new(SystemClock),
        ))
    }

    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn engine(&self) -> &ReportEngine {
        &self.engine
    }
}

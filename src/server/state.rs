use axum::extract::FromRef;

use crate::recommend::RecommenderEngine;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

/// One read-only engine snapshot shared across concurrent requests. Queries
/// are pure functions of the engine and their inputs, so no locking.
pub type SharedEngine = Arc<RecommenderEngine>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub engine: SharedEngine,
    pub hash: String,
}

impl FromRef<ServerState> for SharedEngine {
    fn from_ref(input: &ServerState) -> Self {
        input.engine.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

//! Server assembly and bootstrap.

use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use crate::recommend::RecommenderEngine;
use tower_http::services::ServeDir;

use axum::{
    extract::State, middleware, response::IntoResponse, routing::get, Json, Router,
};
use serde::Serialize;

use super::{log_requests, make_recommend_routes, state::ServerState, RequestsLoggingLevel, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub catalog_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hybrid_catalog_size: Option<usize>,
    pub hybrid_available: bool,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        catalog_size: state.engine.catalog_size(),
        hybrid_catalog_size: state.engine.hybrid_catalog_size(),
        hybrid_available: state.engine.has_hybrid(),
    };
    Json(stats)
}

async fn version(State(state): State<ServerState>) -> impl IntoResponse {
    state.hash.clone()
}

pub fn make_app(config: ServerConfig, engine: Arc<RecommenderEngine>) -> Result<Router> {
    let state = ServerState {
        config: config.clone(),
        start_time: Instant::now(),
        engine,
        hash: env!("GIT_HASH").to_string(),
    };

    let mut app = Router::new()
        .route("/", get(home))
        .route("/version", get(version))
        .merge(make_recommend_routes())
        .with_state(state.clone());

    if let Some(frontend_dir) = &config.frontend_dir_path {
        app = app.fallback_service(ServeDir::new(frontend_dir));
    }

    app = app.layer(middleware::from_fn_with_state(state, log_requests));
    Ok(app)
}

pub async fn run_server(
    engine: Arc<RecommenderEngine>,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
    frontend_dir_path: Option<String>,
) -> Result<()> {
    let config = ServerConfig {
        requests_logging_level,
        port,
        frontend_dir_path,
    };
    let app = make_app(config, engine)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Listening on 127.0.0.1:{}", port);

    Ok(axum::serve(listener, app).await?)
}

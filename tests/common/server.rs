//! Test server lifecycle management
//!
//! Spawns an isolated server per test: fixture artifacts in a temp
//! directory, the real artifact loaders, and the real app bound to a random
//! port. Dropping the handle shuts the server down and removes the temp
//! directory.

use super::fixtures::{write_artifacts, write_content_only_artifacts};
use songsage_server::artifacts::{load_engine, ArtifactPaths};
use songsage_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    // Private fields - keep resources alive until drop
    _temp_artifact_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server with the full artifact set, hybrid included.
    pub async fn spawn() -> Self {
        Self::spawn_with(write_artifacts).await
    }

    /// Spawns a server with content artifacts only; hybrid requests must be
    /// refused and auto mode must always pick content.
    pub async fn spawn_content_only() -> Self {
        Self::spawn_with(write_content_only_artifacts).await
    }

    async fn spawn_with(write_fixtures: fn(&Path) -> ArtifactPaths) -> Self {
        let temp_artifact_dir = TempDir::new().expect("Failed to create temp artifact dir");
        let artifact_paths = write_fixtures(temp_artifact_dir.path());

        let engine = load_engine(&artifact_paths).expect("Failed to load fixture artifacts");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            frontend_dir_path: None,
        };
        let app = make_app(config, Arc::new(engine)).expect("Failed to build app");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Test server crashed");
        });

        Self {
            base_url,
            port,
            _temp_artifact_dir: temp_artifact_dir,
            _shutdown_tx: Some(shutdown_tx),
        }
    }
}

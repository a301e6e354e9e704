use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use songsage_server::artifacts::load_engine;
use songsage_server::config::{AppConfig, CliConfig, FileConfig};
use songsage_server::server::{run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the song catalog CSV.
    #[clap(long, value_parser = parse_path)]
    pub catalog_csv: Option<PathBuf>,

    /// Path to the content feature matrix (Matrix Market).
    #[clap(long, value_parser = parse_path)]
    pub content_matrix: Option<PathBuf>,

    /// Path to the hybrid filtered catalog CSV (must carry a track_id column).
    #[clap(long, value_parser = parse_path)]
    pub filtered_catalog_csv: Option<PathBuf>,

    /// Path to the content feature matrix aligned with the filtered catalog.
    #[clap(long, value_parser = parse_path)]
    pub hybrid_content_matrix: Option<PathBuf>,

    /// Path to the user-item interaction matrix (Matrix Market).
    #[clap(long, value_parser = parse_path)]
    pub interaction_matrix: Option<PathBuf>,

    /// Path to the track id list, one id per interaction-matrix column.
    #[clap(long, value_parser = parse_path)]
    pub track_ids: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Path to a TOML config file; values there override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;

    let cli_config = CliConfig {
        catalog_csv: cli_args.catalog_csv,
        content_matrix: cli_args.content_matrix,
        filtered_catalog_csv: cli_args.filtered_catalog_csv,
        hybrid_content_matrix: cli_args.hybrid_content_matrix,
        interaction_matrix: cli_args.interaction_matrix,
        track_ids: cli_args.track_ids,
        port: cli_args.port,
        logging_level: cli_args.logging_level,
        frontend_dir_path: cli_args.frontend_dir_path,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    let engine = load_engine(&config.artifacts)?;

    run_server(
        Arc::new(engine),
        config.logging_level,
        config.port,
        config.frontend_dir_path,
    )
    .await
}

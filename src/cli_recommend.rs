//! One-shot recommendation CLI.
//!
//! Loads the same artifacts as the server, answers a single query on stdout
//! and exits. Handy for smoke-testing an artifact set without standing up
//! the HTTP surface.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use songsage_server::artifacts::load_engine;
use songsage_server::config::{AppConfig, CliConfig, FileConfig};
use songsage_server::recommend::{RecommendError, RecommendationList};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Song title to query.
    pub title: String,

    /// Artist of the song.
    pub artist: String,

    /// Number of recommendations.
    #[clap(short, long, default_value_t = 10)]
    pub k: usize,

    /// Content weight in [0, 1]; forces hybrid mode when set.
    #[clap(long)]
    pub weight_content: Option<f64>,

    /// Path to the song catalog CSV.
    #[clap(long)]
    pub catalog_csv: Option<PathBuf>,

    /// Path to the content feature matrix (Matrix Market).
    #[clap(long)]
    pub content_matrix: Option<PathBuf>,

    /// Path to the hybrid filtered catalog CSV.
    #[clap(long)]
    pub filtered_catalog_csv: Option<PathBuf>,

    /// Path to the content feature matrix aligned with the filtered catalog.
    #[clap(long)]
    pub hybrid_content_matrix: Option<PathBuf>,

    /// Path to the user-item interaction matrix (Matrix Market).
    #[clap(long)]
    pub interaction_matrix: Option<PathBuf>,

    /// Path to the track id list.
    #[clap(long)]
    pub track_ids: Option<PathBuf>,

    /// Path to a TOML config file; values there override CLI arguments.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

fn print_list(list: &RecommendationList) {
    println!(
        "Currently playing: {} by {}",
        list.query.name, list.query.artist
    );
    for recommendation in &list.recommendations {
        println!(
            "{:>3}. {} by {} (score {:.3})",
            recommendation.rank, recommendation.name, recommendation.artist, recommendation.score
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli_args = CliArgs::parse();

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
        ..Default::default()
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    let engine = load_engine(&config.artifacts)?;

    let result = match cli_args.weight_content {
        Some(weight) => engine.recommend_hybrid(&cli_args.title, &cli_args.artist, cli_args.k, weight),
        None if engine.hybrid_covers(&cli_args.title, &cli_args.artist) => {
            engine.recommend_hybrid(&cli_args.title, &cli_args.artist, cli_args.k, 0.5)
        }
        None => engine.recommend_content(&cli_args.title, &cli_args.artist, cli_args.k),
    };

    match result {
        Ok(list) => {
            print_list(&list);
            Ok(())
        }
        Err(RecommendError::SongNotFound { title, artist }) => {
            println!("Sorry, couldn't find {} by {} in the database.", title, artist);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

mod file_config;

pub use file_config::FileConfig;

use crate::artifacts::{ArtifactPaths, HybridArtifactPaths};
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub catalog_csv: Option<PathBuf>,
    pub content_matrix: Option<PathBuf>,
    pub filtered_catalog_csv: Option<PathBuf>,
    pub hybrid_content_matrix: Option<PathBuf>,
    pub interaction_matrix: Option<PathBuf>,
    pub track_ids: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub artifacts: ArtifactPaths,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let catalog_csv = resolve_path(file.catalog_csv, &cli.catalog_csv);
        let content_matrix = resolve_path(file.content_matrix, &cli.content_matrix);

        let Some(catalog_csv) = catalog_csv else {
            bail!("catalog csv must be specified via --catalog-csv or in the config file");
        };
        let Some(content_matrix) = content_matrix else {
            bail!("content matrix must be specified via --content-matrix or in the config file");
        };
        require_file(&catalog_csv, "catalog csv")?;
        require_file(&content_matrix, "content matrix")?;

        // Hybrid artifacts are all-or-nothing: a partial group would force
        // the engine to guess at a degradation policy.
        let filtered_catalog_csv = resolve_path(file.filtered_catalog_csv, &cli.filtered_catalog_csv);
        let hybrid_content_matrix =
            resolve_path(file.hybrid_content_matrix, &cli.hybrid_content_matrix);
        let interaction_matrix = resolve_path(file.interaction_matrix, &cli.interaction_matrix);
        let track_ids = resolve_path(file.track_ids, &cli.track_ids);

        let configured = [
            filtered_catalog_csv.is_some(),
            hybrid_content_matrix.is_some(),
            interaction_matrix.is_some(),
            track_ids.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count();

        let hybrid = match (
            filtered_catalog_csv,
            hybrid_content_matrix,
            interaction_matrix,
            track_ids,
        ) {
            (Some(filtered_catalog_csv), Some(content_matrix), Some(interaction_matrix), Some(track_ids)) => {
                require_file(&filtered_catalog_csv, "filtered catalog csv")?;
                require_file(&content_matrix, "hybrid content matrix")?;
                require_file(&interaction_matrix, "interaction matrix")?;
                require_file(&track_ids, "track id list")?;
                Some(HybridArtifactPaths {
                    filtered_catalog_csv,
                    content_matrix,
                    interaction_matrix,
                    track_ids,
                })
            }
            _ if configured > 0 => {
                bail!(
                    "Hybrid artifacts must be configured together: \
                     filtered catalog csv, hybrid content matrix, interaction matrix and track id list"
                );
            }
            _ => None,
        };

        let port = file.port.unwrap_or(cli.port);
        let logging_level = match file.logging_level {
            Some(value) => match RequestsLoggingLevel::from_str(&value, true) {
                Ok(level) => level,
                Err(_) => bail!("Unknown logging_level in config file: {}", value),
            },
            None => cli.logging_level.clone(),
        };
        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        Ok(Self {
            artifacts: ArtifactPaths {
                catalog_csv,
                content_matrix,
                hybrid,
            },
            port,
            logging_level,
            frontend_dir_path,
        })
    }
}

fn resolve_path(file_value: Option<String>, cli_value: &Option<PathBuf>) -> Option<PathBuf> {
    file_value.map(PathBuf::from).or_else(|| cli_value.clone())
}

fn require_file(path: &PathBuf, label: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} does not exist: {:?}", label, path);
    }
    if !path.is_file() {
        bail!("{} is not a file: {:?}", label, path);
    }
    Ok(())
}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Artifact paths (can override CLI)
    pub catalog_csv: Option<String>,
    pub content_matrix: Option<String>,

    // Hybrid artifact group
    pub filtered_catalog_csv: Option<String>,
    pub hybrid_content_matrix: Option<String>,
    pub interaction_matrix: Option<String>,
    pub track_ids: Option<String>,

    // Server settings
    pub port: Option<u16>,
    pub logging_level: Option<String>,
    pub frontend_dir_path: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

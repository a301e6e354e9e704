//! Loading of pre-built artifacts into an engine.
//!
//! The artifacts come out of an external pipeline: CSV song tables, Matrix
//! Market sparse matrices, and a newline-delimited track id list. Hybrid
//! artifacts are optional as a group; everything else about their alignment
//! is validated by `RecommenderEngine::new`, not here.

use crate::catalog::{load_catalog, load_filtered_catalog, load_track_ids};
use crate::recommend::{HybridArtifacts, RecommenderEngine};
use anyhow::{Context, Result};
use sprs::{CsMat, TriMat};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub catalog_csv: PathBuf,
    pub content_matrix: PathBuf,
    pub hybrid: Option<HybridArtifactPaths>,
}

#[derive(Debug, Clone)]
pub struct HybridArtifactPaths {
    pub filtered_catalog_csv: PathBuf,
    pub content_matrix: PathBuf,
    pub interaction_matrix: PathBuf,
    pub track_ids: PathBuf,
}

pub fn load_sparse_matrix(path: impl AsRef<Path>) -> Result<CsMat<f64>> {
    let path = path.as_ref();
    let triplets: TriMat<f64> = sprs::io::read_matrix_market(path)
        .with_context(|| format!("Failed to read matrix market file {}", path.display()))?;
    Ok(triplets.to_csr())
}

/// Load every configured artifact and bind the engine.
pub fn load_engine(paths: &ArtifactPaths) -> Result<RecommenderEngine> {
    let catalog = load_catalog(&paths.catalog_csv)?;
    let content_features = load_sparse_matrix(&paths.content_matrix)?;
    info!(
        "Content feature matrix: {} x {}",
        content_features.rows(),
        content_features.cols()
    );

    let hybrid = match &paths.hybrid {
        Some(hybrid_paths) => Some(load_hybrid_artifacts(hybrid_paths)?),
        None => {
            info!("No hybrid artifacts configured, serving content-only recommendations");
            None
        }
    };

    let engine = RecommenderEngine::new(catalog, content_features, hybrid)
        .context("Failed to bind artifacts to the recommendation engine")?;
    info!(
        "Engine ready: {} songs, hybrid coverage for {}",
        engine.catalog_size(),
        match engine.hybrid_catalog_size() {
            Some(size) => format!("{} songs", size),
            None => "no songs".to_string(),
        }
    );
    Ok(engine)
}

fn load_hybrid_artifacts(paths: &HybridArtifactPaths) -> Result<HybridArtifacts> {
    let filtered_catalog = load_filtered_catalog(&paths.filtered_catalog_csv)?;
    let content_features = load_sparse_matrix(&paths.content_matrix)?;
    let interaction_matrix = load_sparse_matrix(&paths.interaction_matrix)?;
    info!(
        "Interaction matrix: {} users x {} tracks",
        interaction_matrix.rows(),
        interaction_matrix.cols()
    );
    let track_ids = load_track_ids(&paths.track_ids)?;

    Ok(HybridArtifacts {
        filtered_catalog,
        content_features,
        interaction_matrix,
        track_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_sparse_matrix_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "%%MatrixMarket matrix coordinate real general\n\
             3 2 3\n\
             1 1 1.5\n\
             2 2 -0.5\n\
             3 1 2.0\n"
        )
        .unwrap();

        let matrix = load_sparse_matrix(file.path()).unwrap();

        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), 2);
        assert_eq!(matrix.get(0, 0), Some(&1.5));
        assert_eq!(matrix.get(1, 1), Some(&-0.5));
        assert_eq!(matrix.get(2, 0), Some(&2.0));
        assert_eq!(matrix.get(0, 1), None);
    }

    #[test]
    fn test_missing_matrix_file_is_an_error() {
        assert!(load_sparse_matrix("/nonexistent/matrix.mtx").is_err());
    }
}

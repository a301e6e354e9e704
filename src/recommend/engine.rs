//! The recommendation engine.
//!
//! Artifacts are bound exactly once at construction, every alignment
//! invariant is checked there, and the engine is immutable afterwards. A
//! query is a pure function of (catalog, matrices, query, weight, k); no
//! locks are needed to serve concurrent requests from a shared `Arc`.

use super::blend::{min_max_normalize, HybridScorer};
use super::collaborative::CollaborativeSimilarityIndex;
use super::content::ContentSimilarityIndex;
use super::error::RecommendError;
use super::ranker::{self, Recommendation};
use crate::catalog::{Catalog, CatalogIndex, FilteredCatalog, SongEntry};
use sprs::CsMat;
use tracing::debug;

/// Tagged request mode, dispatched through one ranking pipeline. Which
/// artifacts a request consumes is decided here, not by sniffing what
/// happens to be loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecommendationMode {
    ContentOnly,
    Hybrid { weight_content: f64 },
}

#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub title: String,
    pub artist: String,
    pub k: usize,
    pub mode: RecommendationMode,
}

/// The result of one query: the resolved query entry (for the caller's
/// optional rank-0 "currently playing" header) and the ranked pool.
#[derive(Debug, Clone)]
pub struct RecommendationList {
    pub query: SongEntry,
    pub recommendations: Vec<Recommendation>,
}

/// Everything hybrid mode needs, handed over as one bundle so the group is
/// either complete or absent.
pub struct HybridArtifacts {
    pub filtered_catalog: FilteredCatalog,
    pub content_features: CsMat<f64>,
    pub interaction_matrix: CsMat<f64>,
    pub track_ids: Vec<String>,
}

struct HybridPipeline {
    catalog: FilteredCatalog,
    index: CatalogIndex,
    content: ContentSimilarityIndex,
    collaborative: CollaborativeSimilarityIndex,
    /// Interaction-matrix column for each filtered catalog row, resolved at
    /// construction so blending always sees row-aligned vectors.
    column_by_row: Vec<usize>,
}

pub struct RecommenderEngine {
    catalog: Catalog,
    catalog_index: CatalogIndex,
    content: ContentSimilarityIndex,
    hybrid: Option<HybridPipeline>,
}

impl RecommenderEngine {
    /// Bind artifacts. Fails fast on any broken alignment invariant rather
    /// than serving silently meaningless scores later.
    pub fn new(
        catalog: Catalog,
        content_features: CsMat<f64>,
        hybrid: Option<HybridArtifacts>,
    ) -> Result<Self, RecommendError> {
        if catalog.len() != content_features.rows() {
            return Err(RecommendError::DimensionMismatch(format!(
                "catalog has {} rows but the content feature matrix has {}",
                catalog.len(),
                content_features.rows()
            )));
        }

        let catalog_index = CatalogIndex::build(
            catalog
                .entries()
                .iter()
                .map(|entry| (entry.name.as_str(), entry.artist.as_str())),
        );
        let content = ContentSimilarityIndex::new(content_features);
        let hybrid = hybrid.map(HybridPipeline::new).transpose()?;

        Ok(Self {
            catalog,
            catalog_index,
            content,
            hybrid,
        })
    }

    pub fn catalog_size(&self) -> usize {
        self.catalog.len()
    }

    pub fn hybrid_catalog_size(&self) -> Option<usize> {
        self.hybrid.as_ref().map(|h| h.catalog.len())
    }

    pub fn has_hybrid(&self) -> bool {
        self.hybrid.is_some()
    }

    /// Whether the song has collaborative coverage, i.e. whether a hybrid
    /// request for it could succeed. Drives the serving layer's auto mode.
    pub fn hybrid_covers(&self, title: &str, artist: &str) -> bool {
        self.hybrid
            .as_ref()
            .is_some_and(|h| h.index.resolve(title, artist).is_some())
    }

    pub fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationList, RecommendError> {
        if request.k == 0 {
            return Err(RecommendError::InvalidParameter(
                "k must be a positive integer".to_string(),
            ));
        }
        match request.mode {
            RecommendationMode::ContentOnly => self.recommend_content_mode(request),
            RecommendationMode::Hybrid { weight_content } => {
                self.recommend_hybrid_mode(request, weight_content)
            }
        }
    }

    /// Pure content filtering over the full catalog. Never touches the
    /// collaborative index, so it stays available when hybrid artifacts are
    /// absent and pays no interaction-matrix cost.
    pub fn recommend_content(
        &self,
        title: &str,
        artist: &str,
        k: usize,
    ) -> Result<RecommendationList, RecommendError> {
        self.recommend(&RecommendationRequest {
            title: title.to_string(),
            artist: artist.to_string(),
            k,
            mode: RecommendationMode::ContentOnly,
        })
    }

    /// Weighted blend of content and collaborative signals over the
    /// filtered catalog.
    pub fn recommend_hybrid(
        &self,
        title: &str,
        artist: &str,
        k: usize,
        weight_content: f64,
    ) -> Result<RecommendationList, RecommendError> {
        self.recommend(&RecommendationRequest {
            title: title.to_string(),
            artist: artist.to_string(),
            k,
            mode: RecommendationMode::Hybrid { weight_content },
        })
    }

    fn recommend_content_mode(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationList, RecommendError> {
        let row = self
            .catalog_index
            .resolve(&request.title, &request.artist)
            .ok_or_else(|| RecommendError::SongNotFound {
                title: request.title.clone(),
                artist: request.artist.clone(),
            })?;
        debug!("Content query resolved to catalog row {}", row);

        let scores = self.content.similarities(row);
        let ranked = ranker::top_k(&scores, row, request.k);
        let recommendations = ranker::materialize(&ranked, |r| self.catalog.get(r));

        Ok(RecommendationList {
            query: self.catalog.entries()[row].clone(),
            recommendations,
        })
    }

    fn recommend_hybrid_mode(
        &self,
        request: &RecommendationRequest,
        weight_content: f64,
    ) -> Result<RecommendationList, RecommendError> {
        let hybrid = self
            .hybrid
            .as_ref()
            .ok_or(RecommendError::HybridUnavailable)?;
        let scorer = HybridScorer::new(weight_content)?;

        let row = hybrid
            .index
            .resolve(&request.title, &request.artist)
            .ok_or_else(|| RecommendError::SongNotFound {
                title: request.title.clone(),
                artist: request.artist.clone(),
            })?;
        debug!(
            "Hybrid query resolved to filtered row {} (weight_content {})",
            row,
            scorer.weight_content()
        );

        let content_scores = hybrid.content.similarities(row);

        // One scan over all interaction columns, then gathered into
        // filtered-catalog row order through the mapping fixed at load.
        let column_scores = hybrid.collaborative.similarities_at(hybrid.column_by_row[row]);
        let collab_scores: Vec<f64> = hybrid
            .column_by_row
            .iter()
            .map(|&column| column_scores[column])
            .collect();

        let blended = scorer.blend(
            &min_max_normalize(&content_scores),
            &min_max_normalize(&collab_scores),
        )?;
        let ranked = ranker::top_k(&blended, row, request.k);
        let recommendations =
            ranker::materialize(&ranked, |r| hybrid.catalog.get(r).map(|e| &e.song));

        Ok(RecommendationList {
            query: hybrid.catalog.entries()[row].song.clone(),
            recommendations,
        })
    }
}

impl HybridPipeline {
    fn new(artifacts: HybridArtifacts) -> Result<Self, RecommendError> {
        let HybridArtifacts {
            filtered_catalog,
            content_features,
            interaction_matrix,
            track_ids,
        } = artifacts;

        if filtered_catalog.len() != content_features.rows() {
            return Err(RecommendError::DimensionMismatch(format!(
                "filtered catalog has {} rows but the hybrid content matrix has {}",
                filtered_catalog.len(),
                content_features.rows()
            )));
        }

        let collaborative = CollaborativeSimilarityIndex::new(interaction_matrix, track_ids)?;

        // Every filtered row must map onto an interaction column; a hole
        // here is a broken artifact set, not a per-query condition.
        let column_by_row = filtered_catalog
            .entries()
            .iter()
            .map(|entry| {
                collaborative.column_of(&entry.track_id).ok_or_else(|| {
                    RecommendError::DimensionMismatch(format!(
                        "filtered catalog track id {} is absent from the track id list",
                        entry.track_id
                    ))
                })
            })
            .collect::<Result<Vec<usize>, RecommendError>>()?;

        let index = CatalogIndex::build(
            filtered_catalog
                .entries()
                .iter()
                .map(|entry| (entry.song.name.as_str(), entry.song.artist.as_str())),
        );
        let content = ContentSimilarityIndex::new(content_features);

        Ok(Self {
            catalog: filtered_catalog,
            index,
            content,
            collaborative,
            column_by_row,
        })
    }
}

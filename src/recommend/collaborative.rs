//! Collaborative similarity: resemblance between songs based on shared
//! patterns of user interaction, "listened to by similar users" rather than
//! acoustic likeness.
//!
//! The interaction matrix arrives with users on rows and tracks on columns.
//! It is transposed to item-major storage once at construction so each track
//! is a row and the scan machinery is shared with the content index; the
//! track id to column map is likewise built once, never per query.

use super::error::RecommendError;
use super::similarity::RowSimilarityMatrix;
use sprs::CsMat;
use std::collections::HashMap;

pub struct CollaborativeSimilarityIndex {
    item_vectors: RowSimilarityMatrix,
    column_by_track: HashMap<String, usize>,
}

impl CollaborativeSimilarityIndex {
    /// `interaction` has users on rows and tracks on columns; `track_ids`
    /// names the columns in order and must be unique.
    pub fn new(
        interaction: CsMat<f64>,
        track_ids: Vec<String>,
    ) -> Result<Self, RecommendError> {
        if track_ids.len() != interaction.cols() {
            return Err(RecommendError::DimensionMismatch(format!(
                "track id list has {} entries but the interaction matrix has {} columns",
                track_ids.len(),
                interaction.cols()
            )));
        }

        let mut column_by_track = HashMap::with_capacity(track_ids.len());
        for (column, track_id) in track_ids.into_iter().enumerate() {
            if column_by_track.insert(track_id.clone(), column).is_some() {
                return Err(RecommendError::DimensionMismatch(format!(
                    "duplicate track id in track id list: {track_id}"
                )));
            }
        }

        let item_vectors = RowSimilarityMatrix::new(interaction.transpose_into().to_csr());
        Ok(Self {
            item_vectors,
            column_by_track,
        })
    }

    pub fn track_count(&self) -> usize {
        self.item_vectors.row_count()
    }

    pub fn column_of(&self, track_id: &str) -> Option<usize> {
        self.column_by_track.get(track_id).copied()
    }

    /// Cosine similarity of the interaction column for `track_id` against
    /// every column, in track id list order.
    pub fn similarities(&self, track_id: &str) -> Result<Vec<f64>, RecommendError> {
        let column = self
            .column_of(track_id)
            .ok_or_else(|| RecommendError::TrackNotFound(track_id.to_string()))?;
        Ok(self.similarities_at(column))
    }

    /// Same scan for an already-resolved column.
    pub fn similarities_at(&self, column: usize) -> Vec<f64> {
        self.item_vectors.similarities(column)
    }
}

//! Content similarity: resemblance between songs based on their own
//! engineered attributes, independent of listening history.
//!
//! The feature matrix mixes one-hot categorical blocks with scaled numeric
//! blocks; cosine similarity is insensitive to the numeric block's magnitude
//! and handles the sparsity cheaply, which is why it is the metric here.

use super::similarity::RowSimilarityMatrix;
use sprs::CsMat;

pub struct ContentSimilarityIndex {
    features: RowSimilarityMatrix,
}

impl ContentSimilarityIndex {
    /// `features` holds one row per catalog entry, row i describing entry i.
    pub fn new(features: CsMat<f64>) -> Self {
        Self {
            features: RowSimilarityMatrix::new(features),
        }
    }

    pub fn row_count(&self) -> usize {
        self.features.row_count()
    }

    /// Cosine similarity of the feature vector at `row` against every
    /// catalog row. Entry `row` itself scores 1.0 by construction and is
    /// excluded downstream by the ranker, not here.
    pub fn similarities(&self, row: usize) -> Vec<f64> {
        self.features.similarities(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprs::TriMat;

    #[test]
    fn test_scores_cover_every_row() {
        let mut tri = TriMat::new((4, 2));
        tri.add_triplet(0, 0, 1.0);
        tri.add_triplet(1, 0, 0.5);
        tri.add_triplet(1, 1, 0.5);
        tri.add_triplet(2, 1, 2.0);
        let index = ContentSimilarityIndex::new(tri.to_csr());

        let scores = index.similarities(0);

        assert_eq!(scores.len(), 4);
        assert!((scores[0] - 1.0).abs() < 1e-9);
        assert!(scores[1] > scores[2], "closer row must score higher");
        assert_eq!(scores[3], 0.0);
    }
}

//! Cosine similarity scans over a sparse row-major matrix.
//!
//! Both similarity indices reduce to the same primitive: take one row of an
//! item-major matrix and score it against every row. Row L2 norms are
//! precomputed once at construction, the scan itself is parallelized with
//! rayon and allocates only the output vector.

use rayon::prelude::*;
use sprs::{CsMat, CsVecView};

/// A CSR matrix with precomputed row norms, immutable after construction.
pub struct RowSimilarityMatrix {
    rows: CsMat<f64>,
    norms: Vec<f64>,
}

impl RowSimilarityMatrix {
    pub fn new(matrix: CsMat<f64>) -> Self {
        let rows = if matrix.is_csr() {
            matrix
        } else {
            matrix.to_csr()
        };
        let norms = (0..rows.rows())
            .map(|row| l2_norm(rows.outer_view(row)))
            .collect();
        Self { rows, norms }
    }

    pub fn row_count(&self) -> usize {
        self.rows.rows()
    }

    pub fn col_count(&self) -> usize {
        self.rows.cols()
    }

    /// Cosine similarity between `row` and every row of the matrix.
    ///
    /// A zero row scores 0.0 against everything, including itself; that is
    /// accepted, not special-cased. Self-similarity of a non-zero row is 1.0
    /// up to floating-point rounding and is NOT suppressed here: excluding
    /// the query is ranking policy, this is a pure scorer.
    pub fn similarities(&self, row: usize) -> Vec<f64> {
        let query = match self.rows.outer_view(row) {
            Some(view) => view,
            None => return vec![0.0; self.row_count()],
        };
        let query_norm = self.norms[row];

        (0..self.row_count())
            .into_par_iter()
            .map(|other| match self.rows.outer_view(other) {
                Some(view) if query_norm > 0.0 && self.norms[other] > 0.0 => {
                    query.dot(&view) / (query_norm * self.norms[other])
                }
                _ => 0.0,
            })
            .collect()
    }
}

fn l2_norm(row: Option<CsVecView<f64>>) -> f64 {
    row.map(|view| view.dot(&view).sqrt()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprs::TriMat;

    const TOLERANCE: f64 = 1e-9;

    fn matrix(rows: usize, cols: usize, triplets: &[(usize, usize, f64)]) -> RowSimilarityMatrix {
        let mut tri = TriMat::new((rows, cols));
        for &(row, col, value) in triplets {
            tri.add_triplet(row, col, value);
        }
        RowSimilarityMatrix::new(tri.to_csr())
    }

    #[test]
    fn test_self_similarity_is_one() {
        let matrix = matrix(
            3,
            3,
            &[
                (0, 0, 1.0),
                (0, 1, 2.0),
                (1, 1, 3.0),
                (1, 2, 0.5),
                (2, 0, 0.1),
            ],
        );

        for row in 0..3 {
            let scores = matrix.similarities(row);
            assert!(
                (scores[row] - 1.0).abs() < TOLERANCE,
                "self-similarity of row {} was {}",
                row,
                scores[row]
            );
        }
    }

    #[test]
    fn test_orthogonal_rows_score_zero() {
        let matrix = matrix(2, 2, &[(0, 0, 1.0), (1, 1, 1.0)]);
        let scores = matrix.similarities(0);
        assert!(scores[1].abs() < TOLERANCE);
    }

    #[test]
    fn test_cosine_is_scale_invariant() {
        // Row 1 is row 0 scaled by 10; cosine must still be 1.0.
        let matrix = matrix(2, 2, &[(0, 0, 1.0), (0, 1, 2.0), (1, 0, 10.0), (1, 1, 20.0)]);
        let scores = matrix.similarities(0);
        assert!((scores[1] - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_zero_row_scores_zero_everywhere() {
        let matrix = matrix(3, 2, &[(0, 0, 1.0), (1, 1, 1.0)]);

        let scores = matrix.similarities(2);
        assert_eq!(scores, vec![0.0, 0.0, 0.0]);

        // And every other row scores 0.0 against the zero row.
        assert_eq!(matrix.similarities(0)[2], 0.0);
    }

    #[test]
    fn test_known_angle() {
        // (1, 0) against (1, 1): cos = 1/sqrt(2).
        let matrix = matrix(2, 2, &[(0, 0, 1.0), (1, 0, 1.0), (1, 1, 1.0)]);
        let scores = matrix.similarities(0);
        assert!((scores[1] - std::f64::consts::FRAC_1_SQRT_2).abs() < TOLERANCE);
    }
}

//! Weighted blending of content and collaborative score vectors.
//!
//! The two signals come from structurally different matrices, so each vector
//! is min-max normalized on its own before the linear combination. `blend`
//! itself stays a pure weighted sum: `blend(c, s, 1.0) == c` and
//! `blend(c, s, 0.0) == s` elementwise, which makes the degenerate
//! content-only path exactly equivalent to skipping the scorer.

use super::error::RecommendError;

/// Blend policy for one request. The UI's "diversity" control maps inversely
/// onto `weight_content`: more diversity means more crowd signal.
#[derive(Debug, Clone, Copy)]
pub struct HybridScorer {
    weight_content: f64,
}

impl HybridScorer {
    pub fn new(weight_content: f64) -> Result<Self, RecommendError> {
        if !(0.0..=1.0).contains(&weight_content) {
            return Err(RecommendError::InvalidParameter(format!(
                "weight_content must be within [0, 1], got {weight_content}"
            )));
        }
        Ok(Self { weight_content })
    }

    pub fn weight_content(&self) -> f64 {
        self.weight_content
    }

    /// Linear combination of two score vectors indexed by the same catalog
    /// rows. Inputs are expected to be normalized already; alignment is the
    /// engine's construction-time responsibility, but a length mismatch is
    /// still refused rather than silently zipped short.
    pub fn blend(&self, content: &[f64], collab: &[f64]) -> Result<Vec<f64>, RecommendError> {
        if content.len() != collab.len() {
            return Err(RecommendError::DimensionMismatch(format!(
                "content scores ({}) and collaborative scores ({}) differ in length",
                content.len(),
                collab.len()
            )));
        }
        let weight = self.weight_content;
        Ok(content
            .iter()
            .zip(collab)
            .map(|(c, s)| weight * c + (1.0 - weight) * s)
            .collect())
    }
}

/// Rescale scores to [0, 1]. A constant vector carries no ranking
/// information and maps to all zeros.
pub fn min_max_normalize(scores: &[f64]) -> Vec<f64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &score in scores {
        min = min.min(score);
        max = max.max(score);
    }
    let range = max - min;
    if scores.is_empty() || range <= 0.0 || !range.is_finite() {
        return vec![0.0; scores.len()];
    }
    scores.iter().map(|&score| (score - min) / range).collect()
}

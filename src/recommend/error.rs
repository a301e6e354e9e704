//! Error taxonomy of the recommendation engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendError {
    /// The query resolved to no catalog row. Recoverable: the caller decides
    /// whether to fall back to another mode or report "song not in database".
    #[error("song not found: {title} by {artist}")]
    SongNotFound { title: String, artist: String },

    /// A track identifier resolved to no interaction-matrix column.
    #[error("track id not found: {0}")]
    TrackNotFound(String),

    /// An artifact alignment invariant is violated. Fatal: raised at engine
    /// construction so a broken deployment never serves meaningless scores.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A hybrid request against an engine built without hybrid artifacts.
    #[error("hybrid artifacts are not loaded")]
    HybridUnavailable,
}

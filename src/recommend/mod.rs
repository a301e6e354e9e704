//! Hybrid song recommendation engine.
//!
//! Two independent similarity signals over pre-built artifacts: content
//! similarity from song attributes and collaborative similarity from
//! user-item interactions, blended with a caller-supplied weight and ranked
//! deterministically.

mod blend;
mod collaborative;
mod content;
mod engine;
mod error;
mod ranker;
mod similarity;

pub use blend::{min_max_normalize, HybridScorer};
pub use collaborative::CollaborativeSimilarityIndex;
pub use content::ContentSimilarityIndex;
pub use engine::{
    HybridArtifacts, RecommendationList, RecommendationMode, RecommendationRequest,
    RecommenderEngine,
};
pub use error::RecommendError;
pub use ranker::{materialize, top_k, Recommendation};
pub use similarity::RowSimilarityMatrix;

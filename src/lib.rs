//! Songsage Recommender Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod artifacts;
pub mod catalog;
pub mod config;
pub mod recommend;
pub mod server;

// Re-export commonly used types for convenience
pub use recommend::{
    RecommendError, Recommendation, RecommendationMode, RecommendationRequest, RecommenderEngine,
};
pub use server::{run_server, RequestsLoggingLevel};

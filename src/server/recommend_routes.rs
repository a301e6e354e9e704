//! Recommendation API routes

use crate::recommend::{
    RecommendError, Recommendation, RecommendationMode, RecommendationRequest, RecommenderEngine,
};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::state::ServerState;

/// What the original selector offers by default.
const DEFAULT_K: usize = 10;

/// Midpoint of the diversity slider.
const DEFAULT_WEIGHT_CONTENT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestedMode {
    /// Hybrid when the song has collaborative coverage, content otherwise.
    #[default]
    Auto,
    Content,
    Hybrid,
}

#[derive(Debug, Deserialize)]
struct RecommendBody {
    pub title: String,
    pub artist: String,

    #[serde(default = "default_k")]
    pub k: usize,

    #[serde(default)]
    pub mode: RequestedMode,

    /// Diversity slider position, 1-9: weight_content = 1 - diversity/10.
    pub diversity: Option<u8>,

    /// Direct content weight in [0, 1]; takes precedence over `diversity`.
    pub weight_content: Option<f64>,

    /// Echo the query itself back at rank 0 as "currently playing".
    #[serde(default = "default_true")]
    pub include_now_playing: bool,
}

fn default_k() -> usize {
    DEFAULT_K
}

fn default_true() -> bool {
    true
}

#[derive(Serialize)]
struct RecommendResponse {
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_content: Option<f64>,
    pub recommendations: Vec<Recommendation>,
}

/// Resolve the content weight of the request. The UI's diversity control
/// maps inversely: more diversity means less content weight.
fn resolve_weight(body: &RecommendBody) -> Result<f64, RecommendError> {
    if let Some(weight) = body.weight_content {
        return Ok(weight);
    }
    match body.diversity {
        None => Ok(DEFAULT_WEIGHT_CONTENT),
        Some(diversity @ 1..=9) => Ok(1.0 - f64::from(diversity) / 10.0),
        Some(diversity) => Err(RecommendError::InvalidParameter(format!(
            "diversity must be within [1, 9], got {diversity}"
        ))),
    }
}

fn resolve_mode(
    body: &RecommendBody,
    engine: &RecommenderEngine,
) -> Result<RecommendationMode, RecommendError> {
    let hybrid = || {
        resolve_weight(body).map(|weight_content| RecommendationMode::Hybrid { weight_content })
    };
    match body.mode {
        RequestedMode::Content => Ok(RecommendationMode::ContentOnly),
        RequestedMode::Hybrid => hybrid(),
        RequestedMode::Auto => {
            if engine.hybrid_covers(&body.title, &body.artist) {
                hybrid()
            } else {
                Ok(RecommendationMode::ContentOnly)
            }
        }
    }
}

fn error_response(err: RecommendError) -> Response {
    let status = match &err {
        RecommendError::SongNotFound { .. } | RecommendError::TrackNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        RecommendError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
        RecommendError::HybridUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        RecommendError::DimensionMismatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string()).into_response()
}

async fn recommend(State(state): State<ServerState>, Json(body): Json<RecommendBody>) -> Response {
    let mode = match resolve_mode(&body, &state.engine) {
        Ok(mode) => mode,
        Err(err) => return error_response(err),
    };

    let request = RecommendationRequest {
        title: body.title.clone(),
        artist: body.artist.clone(),
        k: body.k,
        mode,
    };

    match state.engine.recommend(&request) {
        Ok(list) => {
            let mut recommendations = Vec::with_capacity(list.recommendations.len() + 1);
            if body.include_now_playing {
                // Explicit presentation-layer step: the ranked pool never
                // contains the query, rank 0 is re-inserted here.
                recommendations.push(Recommendation::now_playing(&list.query));
            }
            recommendations.extend(list.recommendations);

            let (mode_label, weight_content) = match mode {
                RecommendationMode::ContentOnly => ("content", None),
                RecommendationMode::Hybrid { weight_content } => ("hybrid", Some(weight_content)),
            };
            Json(RecommendResponse {
                mode: mode_label,
                weight_content,
                recommendations,
            })
            .into_response()
        }
        Err(err) => error_response(err),
    }
}

pub fn make_recommend_routes() -> Router<ServerState> {
    Router::new().route("/recommend", post(recommend))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(diversity: Option<u8>, weight_content: Option<f64>) -> RecommendBody {
        RecommendBody {
            title: "a".into(),
            artist: "b".into(),
            k: 10,
            mode: RequestedMode::Auto,
            diversity,
            weight_content,
            include_now_playing: true,
        }
    }

    #[test]
    fn test_diversity_maps_inversely_to_content_weight() {
        assert_eq!(resolve_weight(&body(Some(1), None)).unwrap(), 0.9);
        assert_eq!(resolve_weight(&body(Some(5), None)).unwrap(), 0.5);
        assert_eq!(resolve_weight(&body(Some(9), None)).unwrap(), 0.1);
    }

    #[test]
    fn test_explicit_weight_takes_precedence() {
        assert_eq!(resolve_weight(&body(Some(9), Some(0.7))).unwrap(), 0.7);
    }

    #[test]
    fn test_diversity_out_of_range_is_invalid() {
        assert!(resolve_weight(&body(Some(0), None)).is_err());
        assert!(resolve_weight(&body(Some(10), None)).is_err());
    }

    #[test]
    fn test_default_weight_is_the_slider_midpoint() {
        assert_eq!(resolve_weight(&body(None, None)).unwrap(), 0.5);
    }
}

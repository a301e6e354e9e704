//! Top-k selection and materialization into presentation-ready records.

use crate::catalog::SongEntry;
use serde::Serialize;
use std::cmp::Ordering;

/// One recommendation row. Rank is an explicit field, never an iteration
/// order: ranks 1..=k come out of the ranker, and rank 0 is reserved for the
/// query itself when the presentation layer re-inserts it as "currently
/// playing".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub rank: usize,
    pub name: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_preview_url: Option<String>,
    pub score: f64,
}

impl Recommendation {
    /// The query's own entry echoed back at rank 0. Self-similarity is 1.0
    /// by construction, so that is the score it reports.
    pub fn now_playing(entry: &SongEntry) -> Self {
        Self {
            rank: 0,
            name: entry.name.clone(),
            artist: entry.artist.clone(),
            spotify_preview_url: entry.spotify_preview_url.clone(),
            score: 1.0,
        }
    }
}

/// Select the top k `(row, score)` pairs: the query's own row is excluded
/// from the candidate pool, remaining rows sort by descending score with
/// ties broken by ascending row index, and the result is truncated to k.
///
/// Floating-point similarity scores tie frequently among near-duplicate
/// feature rows; the row-index tie-break keeps output reproducible across
/// runs. Asking for more candidates than exist returns what there is.
pub fn top_k(scores: &[f64], exclude_row: usize, k: usize) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|&(row, _)| row != exclude_row)
        .collect();
    ranked.sort_by(|&(row_a, score_a), &(row_b, score_b)| {
        score_b
            .partial_cmp(&score_a)
            .unwrap_or(Ordering::Equal)
            .then(row_a.cmp(&row_b))
    });
    ranked.truncate(k);
    ranked
}

/// Map ranked rows back to catalog entries, attaching ranks 1..=k in order.
/// `entry_at` hides which table (full or filtered) backs the rows.
pub fn materialize<'a>(
    ranked: &[(usize, f64)],
    entry_at: impl Fn(usize) -> Option<&'a SongEntry>,
) -> Vec<Recommendation> {
    ranked
        .iter()
        .enumerate()
        .filter_map(|(position, &(row, score))| {
            entry_at(row).map(|entry| Recommendation {
                rank: position + 1,
                name: entry.name.clone(),
                artist: entry.artist.clone(),
                spotify_preview_url: entry.spotify_preview_url.clone(),
                score,
            })
        })
        .collect()
}

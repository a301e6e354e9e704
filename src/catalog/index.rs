//! Identity resolution from a (title, artist) pair to a catalog row.
//!
//! Matching is exact and case-insensitive on the pair taken jointly: catalogs
//! contain same-titled songs by different artists, so a title alone is never
//! enough. When several rows share an identity the first one in catalog order
//! wins, which keeps lookups deterministic across runs.

use std::collections::HashMap;

/// Normalize a title or artist for identity matching.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

pub struct CatalogIndex {
    row_by_identity: HashMap<(String, String), usize>,
}

impl CatalogIndex {
    /// Build the index from `(name, artist)` pairs in catalog row order.
    pub fn build<'a>(identities: impl Iterator<Item = (&'a str, &'a str)>) -> Self {
        let mut row_by_identity = HashMap::new();
        for (row, (name, artist)) in identities.enumerate() {
            // First occurrence wins for duplicate identities.
            row_by_identity
                .entry((normalize(name), normalize(artist)))
                .or_insert(row);
        }
        Self { row_by_identity }
    }

    /// Resolve a query to a catalog row, or `None` when no row matches both
    /// fields.
    pub fn resolve(&self, title: &str, artist: &str) -> Option<usize> {
        self.row_by_identity
            .get(&(normalize(title), normalize(artist)))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.row_by_identity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_by_identity.is_empty()
    }
}

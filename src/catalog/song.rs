//! Song table types.
//!
//! Both tables are row-ordered and immutable after load: the row position of
//! an entry is its row in the matching feature matrix, so reordering after
//! load would silently desynchronize scores from songs.

use serde::{Deserialize, Serialize};

/// A single row of the song catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongEntry {
    pub name: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_preview_url: Option<String>,
}

/// The full song catalog, aligned row-for-row with the content feature matrix.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<SongEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<SongEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&SongEntry> {
        self.entries.get(row)
    }

    pub fn entries(&self) -> &[SongEntry] {
        &self.entries
    }
}

/// A catalog row that also has collaborative coverage: the track id locates
/// the song's column in the interaction matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredEntry {
    pub song: SongEntry,
    pub track_id: String,
}

/// The subset of the catalog usable in hybrid mode, aligned row-for-row with
/// the hybrid content feature matrix.
#[derive(Debug, Clone)]
pub struct FilteredCatalog {
    entries: Vec<FilteredEntry>,
}

impl FilteredCatalog {
    pub fn new(entries: Vec<FilteredEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&FilteredEntry> {
        self.entries.get(row)
    }

    pub fn entries(&self) -> &[FilteredEntry] {
        &self.entries
    }
}

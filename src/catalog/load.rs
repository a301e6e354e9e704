//! Catalog loading from CSV artifacts.
//!
//! The catalog tables are produced by an external cleaning pipeline and may
//! carry many more columns than we consume; deserialization picks out the
//! fields we need and ignores the rest.

use super::{Catalog, FilteredCatalog, FilteredEntry, SongEntry};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct SongRecord {
    name: String,
    artist: String,
    spotify_preview_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FilteredRecord {
    name: String,
    artist: String,
    spotify_preview_url: Option<String>,
    track_id: String,
}

impl From<SongRecord> for SongEntry {
    fn from(record: SongRecord) -> Self {
        SongEntry {
            name: record.name,
            artist: record.artist,
            spotify_preview_url: record
                .spotify_preview_url
                .filter(|url| !url.trim().is_empty()),
        }
    }
}

pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open catalog csv {}", path.display()))?;

    let mut entries = Vec::new();
    for record in reader.deserialize() {
        let record: SongRecord = record
            .with_context(|| format!("Malformed row in catalog csv {}", path.display()))?;
        entries.push(SongEntry::from(record));
    }
    if entries.is_empty() {
        bail!("Catalog csv {} has no rows", path.display());
    }

    info!("Loaded song catalog: {} rows", entries.len());
    Ok(Catalog::new(entries))
}

pub fn load_filtered_catalog(path: impl AsRef<Path>) -> Result<FilteredCatalog> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open filtered catalog csv {}", path.display()))?;

    let mut entries = Vec::new();
    for record in reader.deserialize() {
        let record: FilteredRecord = record
            .with_context(|| format!("Malformed row in filtered catalog csv {}", path.display()))?;
        if record.track_id.trim().is_empty() {
            bail!(
                "Filtered catalog csv {} row {} has an empty track_id",
                path.display(),
                entries.len()
            );
        }
        entries.push(FilteredEntry {
            song: SongEntry::from(SongRecord {
                name: record.name,
                artist: record.artist,
                spotify_preview_url: record.spotify_preview_url,
            }),
            track_id: record.track_id,
        });
    }
    if entries.is_empty() {
        bail!("Filtered catalog csv {} has no rows", path.display());
    }

    info!("Loaded filtered catalog: {} rows", entries.len());
    Ok(FilteredCatalog::new(entries))
}

/// Load the track identifier list, one id per line, aligned with the
/// interaction matrix columns.
pub fn load_track_ids(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read track id list {}", path.display()))?;

    let ids: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();
    if ids.is_empty() {
        bail!("Track id list {} is empty", path.display());
    }

    info!("Loaded track id list: {} ids", ids.len());
    Ok(ids)
}

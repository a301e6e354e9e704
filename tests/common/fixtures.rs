//! Fixture artifacts for end-to-end tests
//!
//! Builds a small but complete artifact set on disk: a six-song catalog, a
//! four-song filtered catalog with collaborative coverage, and the matching
//! Matrix Market matrices. The feature geometry is chosen so expected
//! rankings are easy to reason about in tests.

use songsage_server::artifacts::{ArtifactPaths, HybridArtifactPaths};
use std::fs;
use std::path::{Path, PathBuf};

/// A song present in both catalogs: hybrid requests for it succeed.
pub const SONG_COVERED: &str = "Midnight Drive";
pub const SONG_COVERED_ARTIST: &str = "Neon Harbor";

/// A song present only in the full catalog: auto mode must fall back to
/// content filtering for it.
pub const SONG_UNCOVERED: &str = "Undertow";
pub const SONG_UNCOVERED_ARTIST: &str = "The Spill";

fn write(path: &Path, contents: &str) -> PathBuf {
    fs::write(path, contents).expect("Failed to write fixture file");
    path.to_path_buf()
}

fn write_matrix_market(
    path: &Path,
    rows: usize,
    cols: usize,
    triplets: &[(usize, usize, f64)],
) -> PathBuf {
    let mut contents = String::from("%%MatrixMarket matrix coordinate real general\n");
    contents.push_str(&format!("{} {} {}\n", rows, cols, triplets.len()));
    for &(row, col, value) in triplets {
        // Matrix Market indices are 1-based.
        contents.push_str(&format!("{} {} {}\n", row + 1, col + 1, value));
    }
    write(path, &contents)
}

fn write_catalog_csv(dir: &Path) -> PathBuf {
    write(
        &dir.join("songs.csv"),
        "name,artist,spotify_preview_url,year\n\
         Midnight Drive,Neon Harbor,http://example.com/previews/midnight-drive.mp3,2019\n\
         Harbor Lights,Neon Harbor,http://example.com/previews/harbor-lights.mp3,2020\n\
         Glass City,Vera Moon,,2018\n\
         Undertow,The Spill,http://example.com/previews/undertow.mp3,2021\n\
         Paper Planes Home,Vera Moon,,2017\n\
         Static Bloom,Grey Parade,,2022\n",
    )
}

/// Rows aligned with `write_catalog_csv`. Row 1 points almost the same way
/// as row 0, row 3 is orthogonal, row 5 is all-zero.
fn write_content_matrix(dir: &Path) -> PathBuf {
    write_matrix_market(
        &dir.join("content.mtx"),
        6,
        3,
        &[
            (0, 0, 1.0),
            (1, 0, 0.9),
            (1, 1, 0.44),
            (2, 0, 0.2),
            (2, 1, 0.98),
            (3, 2, 1.0),
            (4, 0, 0.8),
            (4, 1, 0.6),
        ],
    )
}

fn write_filtered_csv(dir: &Path) -> PathBuf {
    write(
        &dir.join("filtered.csv"),
        "name,artist,spotify_preview_url,track_id\n\
         Midnight Drive,Neon Harbor,http://example.com/previews/midnight-drive.mp3,TR001\n\
         Harbor Lights,Neon Harbor,http://example.com/previews/harbor-lights.mp3,TR002\n\
         Glass City,Vera Moon,,TR003\n\
         Paper Planes Home,Vera Moon,,TR004\n",
    )
}

fn write_hybrid_content_matrix(dir: &Path) -> PathBuf {
    write_matrix_market(
        &dir.join("hybrid_content.mtx"),
        4,
        3,
        &[
            (0, 0, 1.0),
            (1, 0, 0.9),
            (1, 1, 0.44),
            (2, 0, 0.2),
            (2, 1, 0.98),
            (3, 0, 0.8),
            (3, 1, 0.6),
        ],
    )
}

/// Three users over four tracks. TR001 and TR003 share an audience, TR002
/// belongs to a disjoint listener.
fn write_interaction_matrix(dir: &Path) -> PathBuf {
    write_matrix_market(
        &dir.join("interaction.mtx"),
        3,
        4,
        &[
            (0, 0, 5.0),
            (0, 2, 4.0),
            (1, 0, 2.0),
            (1, 2, 3.0),
            (1, 3, 1.0),
            (2, 1, 6.0),
        ],
    )
}

fn write_track_ids(dir: &Path) -> PathBuf {
    write(&dir.join("track_ids.txt"), "TR001\nTR002\nTR003\nTR004\n")
}

/// Write the full artifact set, hybrid included.
pub fn write_artifacts(dir: &Path) -> ArtifactPaths {
    ArtifactPaths {
        catalog_csv: write_catalog_csv(dir),
        content_matrix: write_content_matrix(dir),
        hybrid: Some(HybridArtifactPaths {
            filtered_catalog_csv: write_filtered_csv(dir),
            content_matrix: write_hybrid_content_matrix(dir),
            interaction_matrix: write_interaction_matrix(dir),
            track_ids: write_track_ids(dir),
        }),
    }
}

/// Write only the content-filtering artifacts.
pub fn write_content_only_artifacts(dir: &Path) -> ArtifactPaths {
    ArtifactPaths {
        catalog_csv: write_catalog_csv(dir),
        content_matrix: write_content_matrix(dir),
        hybrid: None,
    }
}

//! Common test infrastructure
//!
//! This module provides the infrastructure for end-to-end tests: fixture
//! artifacts on disk, a real server on a random port, and a thin reqwest
//! client. Tests should only import from this module, not from internal
//! submodules.

mod client;
mod fixtures;
mod server;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use fixtures::{
    SONG_COVERED, SONG_COVERED_ARTIST, SONG_UNCOVERED, SONG_UNCOVERED_ARTIST,
};
#[allow(unused_imports)]
pub use server::TestServer;

//! HTTP client for end-to-end tests
//!
//! A thin wrapper over reqwest with helpers for the server's endpoints.
//! When request formats change, update only this file.

use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    pub async fn home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }

    pub async fn recommend(&self, body: Value) -> Response {
        self.client
            .post(format!("{}/recommend", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("Recommend request failed")
    }

    /// Minimal recommendation request body for (title, artist).
    pub async fn recommend_simple(&self, title: &str, artist: &str) -> Response {
        self.recommend(json!({ "title": title, "artist": artist }))
            .await
    }
}

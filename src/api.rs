use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tracing::warn;

use crate::constants::ITEMS_PER_PAGE;
use crate::models::{LeaderboardPage, Statistics, TimeWindow};

/// Read-only client for the leaderboard API. Failures never escape: every
/// transport, status, or decode error is logged and collapsed to `None`, so an
/// empty successful page (`Some` with a zero-length `data`) stays
/// distinguishable from a failed fetch.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build API client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("GET {url} returned {status}"));
        }

        response
            .json()
            .await
            .with_context(|| format!("GET {url} returned an invalid body"))
    }

    /// One page of the ranked list for `window`, or `None` on any failure.
    pub async fn fetch_page(&self, page: u64, window: TimeWindow) -> Option<LeaderboardPage> {
        let url = format!(
            "{}/leaderboard/?page={}&limit={}&period={}",
            self.base_url, page, ITEMS_PER_PAGE, window
        );
        match self.get_json(&url).await {
            Ok(page) => Some(page),
            Err(err) => {
                warn!(?err, %window, page, "leaderboard fetch failed");
                None
            }
        }
    }

    /// Aggregate statistics for `window`, or `None` on any failure.
    pub async fn fetch_statistics(&self, window: TimeWindow) -> Option<Statistics> {
        let url = format!("{}/leaderboard/statistics?period={}", self.base_url, window);
        match self.get_json(&url).await {
            Ok(statistics) => Some(statistics),
            Err(err) => {
                warn!(?err, %window, "statistics fetch failed");
                None
            }
        }
    }
}

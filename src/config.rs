use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_DEBOUNCE_MS, DEFAULT_EXPLORER_BASE_URL,
    DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_TICK_MS,
};

#[derive(Clone)]
pub struct Config {
    pub api_base_url: String,
    pub explorer_base_url: String,
    pub request_timeout: Duration,
    pub debounce_delay: Duration,
    pub tick_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_override = read_env_first(&["API_BASE_URL", "LEADERBOARD_API_URL"]);
        if api_override.is_none() {
            warn!("API_BASE_URL not set; defaulting to {}", DEFAULT_API_BASE_URL);
        }
        let api_base_url = api_override.unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        url::Url::parse(&api_base_url)
            .with_context(|| format!("invalid API base URL: {api_base_url}"))?;

        let explorer_base_url = read_env_first(&["EXPLORER_BASE_URL"])
            .unwrap_or_else(|| DEFAULT_EXPLORER_BASE_URL.to_string());
        url::Url::parse(&explorer_base_url)
            .with_context(|| format!("invalid explorer base URL: {explorer_base_url}"))?;

        let request_timeout = Duration::from_millis(
            env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        );

        let debounce_delay = Duration::from_millis(
            env::var("SEARCH_DEBOUNCE_MS")
                .ok()
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(DEFAULT_DEBOUNCE_MS),
        );

        let tick_interval = Duration::from_millis(
            env::var("TICK_MS")
                .ok()
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(DEFAULT_TICK_MS)
                .max(10),
        );

        Ok(Self {
            api_base_url,
            explorer_base_url,
            request_timeout,
            debounce_delay,
            tick_interval,
        })
    }
}

pub fn read_env_first(keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Ok(value) = env::var(key) {
            let trimmed = value.trim().to_string();
            if !trimmed.is_empty() {
                return Some(trimmed);
            }
        }
    }
    None
}

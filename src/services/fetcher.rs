// src/services/fetcher.rs

//! Page fetcher.
//!
//! A single bounded attempt per URL. Every failure mode (connect error,
//! timeout, non-2xx status, undecodable body) degrades uniformly to an
//! empty body; the refresh pipeline treats "no data" as the signal to
//! fall back to sample records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::ScraperConfig;

/// Trait for page retrieval backends.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch a URL, returning the body text or an empty string on any
    /// failure. Never errors.
    async fn fetch(&self, url: &str) -> String;
}

/// HTTP fetcher backed by a shared reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the configured user agent and timeout.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> String {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Fetch failed for {}: {}", url, e);
                return String::new();
            }
        };

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Fetch returned error status for {}: {}", url, e);
                return String::new();
            }
        };

        match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Failed to read body from {}: {}", url, e);
                String::new()
            }
        }
    }
}

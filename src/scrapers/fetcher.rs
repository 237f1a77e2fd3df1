//! Page retrieval behind the [`PageFetcher`] seam.
//!
//! The aggregator only needs "address in, raw text out". [`HttpFetcher`]
//! does that over `reqwest`; tests substitute an in-memory implementation.

use crate::config::FetchConfig;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

/// Why a page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The channel address is not a valid absolute URL.
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] url::ParseError),
    /// Connection, TLS, timeout or body read failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
}

/// Retrieves the raw text behind an address.
pub trait PageFetcher {
    /// Fetch `address` and return its body as text.
    async fn fetch(&self, address: &str) -> Result<String, FetchError>;
}

/// [`PageFetcher`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client with the configured timeout and user agent.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, address: &str) -> Result<String, FetchError> {
        let url = Url::parse(address)?;
        let t0 = Instant::now();

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, elapsed_ms = t0.elapsed().as_millis() as u64, "Listing page returned error status");
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        // Always UTF-8, whatever charset the server declares
        let bytes = response.bytes().await?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        debug!(bytes = body.len(), elapsed_ms = t0.elapsed().as_millis() as u64, "Fetched listing page");
        Ok(body)
    }
}

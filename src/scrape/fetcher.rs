//! HTTP fetcher implementation
//!
//! This module handles every request of a run:
//! - Building the HTTP client with the configured user agent and timeout
//! - Throttling consecutive requests by the configured delay
//! - Classifying failures (network, timeout, HTTP status)
//!
//! There is no retry logic: a failed fetch is reported once and the run
//! moves on to the next target.

use crate::config::{seconds_to_duration, Settings};
use crate::Result;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching one target
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

impl FetchError {
    /// The URL the failed request was sent to
    pub fn url(&self) -> &str {
        match self {
            FetchError::Http { url, .. }
            | FetchError::Timeout { url }
            | FetchError::Status { url, .. }
            | FetchError::Body { url, .. } => url,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `settings` - Global settings supplying user agent and timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(ScrapeError::Config)` - The timeout does not fit in a `Duration`
/// * `Err(ScrapeError::Client)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use daria_scrape::config::Settings;
/// use daria_scrape::scrape::build_http_client;
///
/// let client = build_http_client(&Settings::default()).unwrap();
/// ```
pub fn build_http_client(settings: &Settings) -> Result<Client> {
    let timeout = seconds_to_duration("timeout", settings.timeout)?;
    let client = Client::builder()
        .user_agent(settings.user_agent.as_str())
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()?;
    Ok(client)
}

/// Sequential fetcher that spaces its requests by the configured delay
pub struct Fetcher {
    client: Client,
    delay: Duration,
    requests_sent: u32,
}

impl Fetcher {
    /// Creates a fetcher from validated settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let delay = seconds_to_duration("request_delay", settings.request_delay)?;
        Ok(Self::with_client(build_http_client(settings)?, delay))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, delay: Duration) -> Self {
        Self {
            client,
            delay,
            requests_sent: 0,
        }
    }

    /// Number of requests issued so far
    pub fn requests_sent(&self) -> u32 {
        self.requests_sent
    }

    /// Fetches a page and returns its body as text
    ///
    /// Every call after the first waits for the request delay before
    /// sending anything.
    ///
    /// # Errors
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Timeout | `FetchError::Timeout` |
    /// | Connection or protocol failure | `FetchError::Http` |
    /// | Non-2xx status | `FetchError::Status` |
    /// | Body could not be read | `FetchError::Body` |
    pub async fn fetch(&mut self, url: &str) -> std::result::Result<String, FetchError> {
        if self.requests_sent > 0 && !self.delay.is_zero() {
            tracing::debug!("Waiting {:?} before next request", self.delay);
            tokio::time::sleep(self.delay).await;
        }
        self.requests_sent += 1;

        tracing::info!("Requesting: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    source: e,
                }
            }
        })
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

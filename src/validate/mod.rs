//! Content validation of discovered URLs
//!
//! The crawl optimizes for discovery; this pass re-probes a bounded sample
//! of candidates with a short timeout and rejects pages that are blocked,
//! erroring or nearly empty.

use crate::config::ValidationConfig;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Serialize;
use std::fmt;

/// Why a candidate URL was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// Redirected to a bot-block page
    Blocked,
    /// Status code ≥ 400
    HttpStatus { status: u16 },
    /// Body shorter than the configured minimum
    TooShort { bytes: usize },
    /// Request failed or timed out
    Unreachable,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked => write!(f, "blocked"),
            Self::HttpStatus { status } => write!(f, "HTTP {}", status),
            Self::TooShort { bytes } => write!(f, "too short ({} bytes)", bytes),
            Self::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// Outcome of probing one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub url: String,
    pub rejection: Option<Rejection>,
}

impl Validation {
    pub fn is_accepted(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Re-probes candidate URLs for usable content
pub struct ContentValidator<'a> {
    client: &'a Client,
    config: &'a ValidationConfig,
    concurrency: usize,
}

impl<'a> ContentValidator<'a> {
    /// `concurrency` is the probe window; values below 1 are raised to 1
    pub fn new(client: &'a Client, config: &'a ValidationConfig, concurrency: usize) -> Self {
        Self {
            client,
            config,
            concurrency: concurrency.max(1),
        }
    }

    /// Probes a single URL
    pub async fn check(&self, url: &str) -> Option<Rejection> {
        let response = match self
            .client
            .get(url)
            .timeout(self.config.timeout())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Content test failed for {}: {}", url, e);
                return Some(Rejection::Unreachable);
            }
        };

        if response
            .url()
            .as_str()
            .to_lowercase()
            .contains(&self.config.blocked_marker.to_lowercase())
        {
            tracing::debug!("Blocked page detected: {} -> {}", url, response.url());
            return Some(Rejection::Blocked);
        }

        let status = response.status().as_u16();
        if status >= 400 {
            tracing::debug!("HTTP error {}: {}", status, url);
            return Some(Rejection::HttpStatus { status });
        }

        match response.bytes().await {
            Ok(body) if body.len() < self.config.min_content_bytes => {
                tracing::debug!("Content too short ({} bytes): {}", body.len(), url);
                Some(Rejection::TooShort { bytes: body.len() })
            }
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("Failed to read body of {}: {}", url, e);
                Some(Rejection::Unreachable)
            }
        }
    }

    /// Probes `urls` concurrently, returning outcomes in input order
    pub async fn validate_all(&self, urls: Vec<String>) -> Vec<Validation> {
        let total = urls.len();
        let results: Vec<Validation> = stream::iter(urls)
            .map(|url| async move {
                let rejection = self.check(&url).await;
                Validation { url, rejection }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let accepted = results.iter().filter(|v| v.is_accepted()).count();
        tracing::info!("Content validation: {}/{} URLs have valid content", accepted, total);
        results
    }
}

//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made during the crawl:
//! - Building the shared HTTP client from configuration
//! - GET requests with redirect following
//! - Error classification

use crate::config::Config;
use crate::state::FailureKind;
use reqwest::{redirect::Policy, Client};

/// Content types that never contain links worth following
const BINARY_CONTENT_TYPES: &[&str] = &[
    "image/",
    "audio/",
    "video/",
    "font/",
    "application/pdf",
    "application/octet-stream",
    "application/zip",
];

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        status_code: u16,
        content_type: String,
        body: String,
    },

    /// Response was binary content
    ContentMismatch { content_type: String },

    /// Server answered with a 4xx or 5xx status
    HttpError { status_code: u16 },

    /// Network error (connection refused, timeout, body read failure)
    NetworkError { error: String, kind: FailureKind },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Why this fetch contributed no links, if it failed
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::ContentMismatch { .. } => Some(FailureKind::NonHtml),
            Self::HttpError { .. } => Some(FailureKind::HttpStatus),
            Self::NetworkError { kind, .. } => Some(*kind),
        }
    }
}

/// Builds the HTTP client shared by every request of a run
///
/// The client carries the configured user agent, request and connect
/// timeouts, and follows up to 10 redirects.
///
/// # Example
///
/// ```
/// use policy_scout::config::Config;
/// use policy_scout::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(config.crawler.request_timeout())
        .connect_timeout(config.crawler.connect_timeout())
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true for content types that cannot hold HTML links
pub fn is_binary_content_type(content_type: &str) -> bool {
    let lower = content_type.to_ascii_lowercase();
    BINARY_CONTENT_TYPES
        .iter()
        .any(|prefix| lower.trim_start().starts_with(prefix))
}

/// Fetches a URL for link extraction
///
/// Never retries. Non-binary responses without a content type are treated
/// as markup, since the HTML parser recovers from anything.
pub async fn fetch_page(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let kind = FailureKind::from_reqwest(&e);
            return FetchResult::NetworkError {
                error: e.to_string(),
                kind,
            };
        }
    };

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if is_binary_content_type(&content_type) {
        return FetchResult::ContentMismatch { content_type };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
            kind: FailureKind::from_reqwest(&e),
        },
    }
}

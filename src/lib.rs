//! Policy-Scout: a polite policy-page discovery crawler
//!
//! Given an e-commerce domain, this crate discovers, fetches, scores and ranks
//! the handful of pages most likely to describe shipping, return and insurance
//! policies, under a fixed page budget.

pub mod config;
pub mod crawler;
pub mod output;
pub mod rank;
pub mod robots;
pub mod sitemap;
pub mod state;
pub mod url;
pub mod validate;

use thiserror::Error;

/// Main error type for Policy-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Sitemap parse error for {url}: {message}")]
    SitemapParse { url: String, message: String },

    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Policy-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{discover, DiscoveryReport, DiscoveryRequest, Orchestrator};
pub use rank::{CategoryLimiter, ScoredUrl, Scorer};
pub use state::CrawlPhase;
pub use crate::url::{is_english_locale, is_us_locale, same_domain, SiteTarget};

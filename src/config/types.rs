use crate::rank::KeywordTables;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Policy-Scout
///
/// Every section is optional; missing sections and keys fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub validation: ValidationConfig,
    pub selection: SelectionConfig,
    pub scoring: KeywordTables,
}

/// Crawl loop configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages fetched during one discovery run
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Number of fetches issued concurrently per batch
    #[serde(rename = "batch-size")]
    pub batch_size: usize,

    /// Per-request timeout for crawl fetches (milliseconds)
    #[serde(rename = "request-timeout-ms")]
    pub request_timeout_ms: u64,

    /// Connection establishment timeout (milliseconds)
    #[serde(rename = "connect-timeout-ms")]
    pub connect_timeout_ms: u64,

    /// Pause between consecutive batches (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,

    /// Upper bound on a robots.txt Crawl-delay (milliseconds)
    #[serde(rename = "max-crawl-delay-ms")]
    pub max_crawl_delay_ms: u64,

    /// Skip URLs disallowed by robots.txt and honour its Crawl-delay
    #[serde(rename = "respect-robots")]
    pub respect_robots: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 300,
            batch_size: 15,
            request_timeout_ms: 15_000,
            connect_timeout_ms: 10_000,
            politeness_delay_ms: 1_500,
            max_crawl_delay_ms: 30_000,
            respect_robots: true,
        }
    }
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }

    pub fn max_crawl_delay(&self) -> Duration {
        Duration::from_millis(self.max_crawl_delay_ms)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Full header value, replacing the generated one
    ///
    /// Some storefronts serve bot user agents an empty shell, so operators
    /// can opt into a browser string here.
    #[serde(rename = "override")]
    pub override_value: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "PolicyScout".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/policy-scout/policy-scout".to_string(),
            override_value: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `CrawlerName/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.override_value {
            Some(value) => value.clone(),
            None => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, self.contact_url
            ),
        }
    }
}

/// Content validation pass configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// How many discovered URLs are re-probed
    #[serde(rename = "sample-size")]
    pub sample_size: usize,

    /// Per-probe timeout (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Bodies shorter than this are rejected
    #[serde(rename = "min-content-bytes")]
    pub min_content_bytes: usize,

    /// Substring of a final URL that marks a bot-block page
    #[serde(rename = "blocked-marker")]
    pub blocked_marker: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            sample_size: 100,
            timeout_ms: 8_000,
            min_content_bytes: 500,
            blocked_marker: "blocked?".to_string(),
        }
    }
}

impl ValidationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Final selection configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Default number of URLs returned
    pub limit: usize,

    /// Maximum URLs kept per category
    #[serde(rename = "category-cap")]
    pub category_cap: usize,

    /// URLs scoring below this are never returned
    #[serde(rename = "min-score")]
    pub min_score: u32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            limit: 30,
            category_cap: 2,
            min_score: 1,
        }
    }
}

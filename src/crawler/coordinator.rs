//! Discovery orchestration
//!
//! This module wires one discovery run together:
//! - robots.txt and sitemap resolution
//! - seeding and draining the frontier
//! - content validation of a bounded sample
//! - scoring, category caps and final truncation

use crate::config::Config;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::frontier::Frontier;
use crate::crawler::scheduler::Scheduler;
use crate::output::CrawlStatistics;
use crate::rank::{select, CategoryLimiter, ScoredUrl, Scorer};
use crate::robots::{fetch_robots, ParsedRobots};
use crate::sitemap::SitemapResolver;
use crate::url::{canonicalize_url, same_domain, SiteTarget};
use crate::validate::{ContentValidator, Validation};
use crate::ScoutError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::time::Instant;

/// Conventional help and policy locations
pub const POLICY_SEED_PATHS: &[&str] = &[
    "/help",
    "/support",
    "/customer-service",
    "/contact",
    "/about",
    "/shipping",
    "/returns",
    "/policy",
    "/policies",
    "/faq",
    "/cart",
    "/checkout",
    "/account",
];

/// Conventional insurance, warranty and protection locations
pub const INSURANCE_SEED_PATHS: &[&str] = &[
    "/warranty",
    "/warranties",
    "/insurance",
    "/protection",
    "/coverage",
    "/assurance",
    "/extended-warranty",
    "/protection-plan",
    "/damage-protection",
    "/accident-protection",
    "/pages/warranty",
    "/pages/insurance",
    "/pages/protection",
    "/pages/coverage",
    "/pages/extended-warranty",
];

/// US-locale storefront entry points
pub const US_SEED_PATHS: &[&str] = &[
    "/us",
    "/us/en",
    "/en-us",
    "/us/help",
    "/us/support",
    "/us/shipping",
    "/us/returns",
];

/// The fixed seed list: home page, then policy, insurance and US paths
pub fn seed_urls(target: &SiteTarget) -> Vec<String> {
    std::iter::once("/")
        .chain(POLICY_SEED_PATHS.iter().copied())
        .chain(INSURANCE_SEED_PATHS.iter().copied())
        .chain(US_SEED_PATHS.iter().copied())
        .filter_map(|path| target.join(path))
        .collect()
}

/// Parameters of one discovery run
///
/// Only found URLs that score at least `min-score` and that robots.txt
/// allows are eligible for the validation sample; the sample is the first
/// `sample-size` of those, in discovery order.
#[derive(Debug, Clone)]
pub struct DiscoveryRequest {
    pub target: SiteTarget,

    /// Page budget for the crawl phase
    pub max_pages: usize,

    /// Maximum number of URLs returned
    pub limit: usize,

    /// URLs from an external source; recorded as found, never crawled
    pub pre_seeded: Vec<String>,
}

impl DiscoveryRequest {
    /// A request using the configured budget and limit
    pub fn new(target: SiteTarget, config: &Config) -> Self {
        Self {
            target,
            max_pages: config.crawler.max_pages,
            limit: config.selection.limit,
            pre_seeded: Vec::new(),
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_pre_seeded(mut self, urls: Vec<String>) -> Self {
        self.pre_seeded = urls;
        self
    }
}

/// Everything a discovery run produced
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryReport {
    pub domain: String,

    /// Final ranked URLs, at most `limit`
    pub urls: Vec<String>,

    /// `urls` with their scores
    pub selected: Vec<ScoredUrl>,

    /// Every URL discovered, in discovery order
    pub found: Vec<String>,

    /// Every URL attempted, in fetch order
    pub crawled: Vec<String>,

    /// Sampled URLs the validator rejected
    pub rejected: Vec<Validation>,

    pub statistics: CrawlStatistics,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Runs discovery against one site at a time
///
/// Holds the HTTP client, scorer and category limiter; every run creates
/// its own frontier, so one orchestrator may serve runs sequentially or
/// concurrently.
pub struct Orchestrator {
    config: Config,
    client: Client,
    scorer: Scorer,
    limiter: CategoryLimiter,
}

impl Orchestrator {
    /// Creates an orchestrator; fails only if the HTTP client cannot be built
    pub fn new(config: Config) -> Result<Self, ScoutError> {
        let client = build_http_client(&config)?;
        let scorer = Scorer::new(config.scoring.clone());
        let limiter = CategoryLimiter::with_cap(config.selection.category_cap);
        Ok(Self {
            config,
            client,
            scorer,
            limiter,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Product token matched against robots.txt user-agent groups
    fn product_token(&self) -> &str {
        &self.config.user_agent.crawler_name
    }

    /// Runs one discovery
    ///
    /// Infallible: every network, parse or state failure degrades to fewer
    /// (possibly zero) results.
    pub async fn run(&self, request: &DiscoveryRequest) -> DiscoveryReport {
        let started_at = Utc::now();
        let clock = Instant::now();
        let target = &request.target;
        let mut stats = CrawlStatistics::default();

        tracing::info!(
            "Starting discovery for {} (budget {}, limit {})",
            target.domain(),
            request.max_pages,
            request.limit
        );

        if request.max_pages == 0 {
            tracing::info!("Page budget is zero, nothing to do");
            return self.empty_report(target, started_at, clock);
        }

        let robots = fetch_robots(&self.client, target).await;
        let sitemap = SitemapResolver::new(&self.client, target)
            .resolve(&robots)
            .await;
        stats.sitemaps_parsed = sitemap.sitemaps_parsed;
        stats.sitemaps_failed = sitemap.sitemaps_failed;
        stats.sitemap_urls = sitemap.urls.len();

        let seeds = seed_urls(target);
        stats.seed_urls = seeds.len();

        let pre_seeded = self.accept_pre_seeded(target, &request.pre_seeded);
        stats.pre_seeded = pre_seeded.len();

        let mut frontier = Frontier::new(request.max_pages);
        let drained = self
            .crawl(&mut frontier, target, &robots, sitemap.urls, pre_seeded, seeds, &mut stats)
            .await;
        if let Err(e) = drained {
            tracing::warn!("Crawl stopped early: {}", e);
        }

        let (found, crawled) = frontier.into_parts();
        stats.found = found.len();
        stats.crawled = crawled.len();

        let sample = self.validation_sample(&found, &robots);
        stats.validation_sample = sample.len();

        let validator = ContentValidator::new(
            &self.client,
            &self.config.validation,
            self.config.crawler.batch_size,
        );
        let validations = validator.validate_all(sample).await;

        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        for validation in validations {
            match &validation.rejection {
                Some(rejection) => {
                    stats.record_rejection(rejection);
                    rejected.push(validation);
                }
                None => accepted.push(validation.url),
            }
        }
        stats.validation_accepted = accepted.len();

        let scored = self.scorer.score_all(accepted);
        stats.scored = scored.len();

        let selected = select(
            scored,
            &self.limiter,
            self.config.selection.min_score,
            request.limit,
        );
        stats.selected = selected.len();
        stats.duration_ms = clock.elapsed().as_millis() as u64;

        tracing::info!(
            "Discovery for {} finished: {} URLs selected ({} crawled, {} found)",
            target.domain(),
            selected.len(),
            crawled.len(),
            found.len()
        );

        DiscoveryReport {
            domain: target.domain().to_string(),
            urls: selected.iter().map(|s| s.url.clone()).collect(),
            selected,
            found,
            crawled,
            rejected,
            statistics: stats,
            started_at,
            finished_at: Utc::now(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn crawl(
        &self,
        frontier: &mut Frontier,
        target: &SiteTarget,
        robots: &ParsedRobots,
        sitemap_urls: Vec<String>,
        pre_seeded: Vec<String>,
        seeds: Vec<String>,
        stats: &mut CrawlStatistics,
    ) -> Result<(), ScoutError> {
        frontier.seed(sitemap_urls.into_iter().chain(pre_seeded), seeds)?;

        let honoured = self.config.crawler.respect_robots.then_some(robots);
        let scheduler = Scheduler::new(
            &self.client,
            &self.config.crawler,
            honoured,
            self.product_token(),
            target.domain(),
        );
        scheduler.drain(frontier, stats).await
    }

    /// Canonical, same-domain pre-seeded URLs
    fn accept_pre_seeded(&self, target: &SiteTarget, urls: &[String]) -> Vec<String> {
        urls.iter()
            .filter_map(|raw| match canonicalize_url(raw) {
                Ok(url) => Some(url.to_string()),
                Err(e) => {
                    tracing::debug!("Ignoring pre-seeded URL {}: {}", raw, e);
                    None
                }
            })
            .filter(|url| {
                let keep = same_domain(url, target.domain());
                if !keep {
                    tracing::debug!("Ignoring off-domain pre-seeded URL {}", url);
                }
                keep
            })
            .collect()
    }

    /// The first `sample-size` found URLs that could still be selected
    ///
    /// URLs scoring below the minimum can never be returned and are not
    /// probed; neither are URLs robots.txt disallows.
    fn validation_sample(&self, found: &[String], robots: &ParsedRobots) -> Vec<String> {
        let min_score = self.config.selection.min_score;
        let respect_robots = self.config.crawler.respect_robots;
        found
            .iter()
            .filter(|url| self.scorer.score(url) >= min_score)
            .filter(|url| !respect_robots || robots.is_allowed(url, self.product_token()))
            .take(self.config.validation.sample_size)
            .cloned()
            .collect()
    }

    fn empty_report(
        &self,
        target: &SiteTarget,
        started_at: DateTime<Utc>,
        clock: Instant,
    ) -> DiscoveryReport {
        DiscoveryReport {
            domain: target.domain().to_string(),
            urls: Vec::new(),
            selected: Vec::new(),
            found: Vec::new(),
            crawled: Vec::new(),
            rejected: Vec::new(),
            statistics: CrawlStatistics {
                duration_ms: clock.elapsed().as_millis() as u64,
                ..CrawlStatistics::default()
            },
            started_at,
            finished_at: Utc::now(),
        }
    }
}

/// Discovers policy URLs for a site with the default configuration
///
/// Returns at most `limit` absolute URLs ranked by relevance.
///
/// # Example
///
/// ```no_run
/// use policy_scout::{discover, SiteTarget};
///
/// # async fn run() -> Result<(), policy_scout::ScoutError> {
/// let target = SiteTarget::from_domain("shop.example")?;
/// let urls = discover(target, 300, 10).await?;
/// for url in urls {
///     println!("{}", url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn discover(
    target: SiteTarget,
    max_pages: usize,
    limit: usize,
) -> Result<Vec<String>, ScoutError> {
    let config = Config::default();
    let orchestrator = Orchestrator::new(config.clone())?;
    let request = DiscoveryRequest::new(target, &config)
        .with_max_pages(max_pages)
        .with_limit(limit);
    Ok(orchestrator.run(&request).await.urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_urls() {
        let target = SiteTarget::from_domain("shop.example").unwrap();
        let seeds = seed_urls(&target);

        assert_eq!(seeds[0], "https://shop.example/");
        assert_eq!(
            seeds.len(),
            1 + POLICY_SEED_PATHS.len() + INSURANCE_SEED_PATHS.len() + US_SEED_PATHS.len()
        );
        assert!(seeds.contains(&"https://shop.example/pages/extended-warranty".to_string()));
        assert!(seeds.contains(&"https://shop.example/us/returns".to_string()));

        let unique: std::collections::HashSet<&String> = seeds.iter().collect();
        assert_eq!(unique.len(), seeds.len());
    }

    #[test]
    fn test_request_builder() {
        let config = Config::default();
        let target = SiteTarget::from_domain("shop.example").unwrap();
        let request = DiscoveryRequest::new(target, &config)
            .with_max_pages(5)
            .with_limit(3)
            .with_pre_seeded(vec!["https://shop.example/x".to_string()]);

        assert_eq!(request.max_pages, 5);
        assert_eq!(request.limit, 3);
        assert_eq!(request.pre_seeded.len(), 1);
    }

    #[test]
    fn test_accept_pre_seeded() {
        let orchestrator = Orchestrator::new(Config::default()).unwrap();
        let target = SiteTarget::from_domain("shop.example").unwrap();
        let accepted = orchestrator.accept_pre_seeded(
            &target,
            &[
                "https://shop.example/pages/returns?src=search".to_string(),
                "https://other.example/returns".to_string(),
                "not a url".to_string(),
            ],
        );
        assert_eq!(accepted, vec!["https://shop.example/pages/returns"]);
    }

    #[test]
    fn test_validation_sample_skips_zero_scores_and_disallowed() {
        let mut config = Config::default();
        config.validation.sample_size = 2;
        let orchestrator = Orchestrator::new(config).unwrap();
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /account\n");

        let found = vec![
            "https://acme.example/".to_string(),
            "https://acme.example/account/help".to_string(),
            "https://acme.example/returns".to_string(),
            "https://acme.example/shipping".to_string(),
            "https://acme.example/faq".to_string(),
        ];
        let sample = orchestrator.validation_sample(&found, &robots);
        assert_eq!(
            sample,
            vec!["https://acme.example/returns", "https://acme.example/shipping"]
        );
    }

    #[tokio::test]
    async fn test_zero_budget_makes_no_requests() {
        let orchestrator = Orchestrator::new(Config::default()).unwrap();
        // Port 1 would refuse; a zero budget must not even try
        let target = SiteTarget::from_domain("http://127.0.0.1:1").unwrap();
        let request = DiscoveryRequest::new(target, orchestrator.config()).with_max_pages(0);

        let report = orchestrator.run(&request).await;
        assert!(report.urls.is_empty());
        assert!(report.crawled.is_empty());
        assert!(report.found.is_empty());
    }
}

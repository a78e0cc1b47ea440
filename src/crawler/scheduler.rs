//! Batch fetch scheduler
//!
//! This module drains the frontier:
//! - Takes bounded batches from the pending queue
//! - Fetches each batch concurrently over the shared client
//! - Feeds extracted links back into the frontier
//! - Sleeps the politeness delay between batches

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{fetch_page, FetchResult};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_links;
use crate::output::CrawlStatistics;
use crate::robots::ParsedRobots;
use crate::ScoutError;
use futures::future::join_all;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// Computes the pause between batches
///
/// This takes the maximum of the configured politeness delay and the
/// robots.txt crawl-delay for our product token (when robots are honoured).
/// The crawl-delay is capped at `max-crawl-delay-ms`.
pub fn effective_delay(
    config: &CrawlerConfig,
    robots: Option<&ParsedRobots>,
    product_token: &str,
) -> Duration {
    let robots_delay = robots
        .and_then(|r| r.crawl_delay(product_token))
        .unwrap_or(Duration::ZERO)
        .min(config.max_crawl_delay());
    std::cmp::max(config.politeness_delay(), robots_delay)
}

/// Drains a frontier batch by batch
pub struct Scheduler<'a> {
    client: &'a Client,
    config: &'a CrawlerConfig,
    /// `None` when robots.txt is not honoured
    robots: Option<&'a ParsedRobots>,
    product_token: &'a str,
    domain: &'a str,
    delay: Duration,
}

impl<'a> Scheduler<'a> {
    pub fn new(
        client: &'a Client,
        config: &'a CrawlerConfig,
        robots: Option<&'a ParsedRobots>,
        product_token: &'a str,
        domain: &'a str,
    ) -> Self {
        let delay = effective_delay(config, robots, product_token);
        Self {
            client,
            config,
            robots,
            product_token,
            domain,
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn is_allowed(&self, url: &str) -> bool {
        match self.robots {
            Some(robots) => robots.is_allowed(url, self.product_token),
            None => true,
        }
    }

    /// Runs the crawl loop until the queue is empty or the budget is spent
    ///
    /// Leaves the frontier in `Done`. Individual fetch failures are counted
    /// in `stats` and never abort the loop.
    pub async fn drain(
        &self,
        frontier: &mut Frontier,
        stats: &mut CrawlStatistics,
    ) -> Result<(), ScoutError> {
        let start_time = Instant::now();

        while !frontier.is_exhausted() {
            let batch = frontier.next_batch(self.config.batch_size, |url| self.is_allowed(url))?;
            stats.robots_skipped += batch.skipped.len();

            if batch.urls.is_empty() {
                continue;
            }
            stats.batches += 1;

            let fetches = batch.urls.iter().map(|url| async move {
                tracing::debug!("Crawling: {}", url);
                (url.clone(), fetch_page(self.client, url).await)
            });
            let results = join_all(fetches).await;

            let mut new_links = 0;
            for (url, result) in results {
                new_links += self.absorb(frontier, stats, &url, result);
            }

            let elapsed = start_time.elapsed();
            tracing::info!(
                "Crawled: {}, Found: {}, Queue: {} (+{} links, {:.1} pages/sec)",
                frontier.crawled().len(),
                frontier.found().len(),
                frontier.pending_len(),
                new_links,
                frontier.crawled().len() as f64 / elapsed.as_secs_f64().max(0.001)
            );

            if !frontier.is_exhausted() && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        // Seeded → Draining never happened if the budget was spent up front
        frontier.finish()
    }

    /// Applies one fetch outcome to the frontier; returns links added
    fn absorb(
        &self,
        frontier: &mut Frontier,
        stats: &mut CrawlStatistics,
        url: &str,
        result: FetchResult,
    ) -> usize {
        if let Some(kind) = result.failure_kind() {
            tracing::debug!("Fetch failed ({}): {}", kind, url);
            stats.record_failure(kind);
            return 0;
        }

        let FetchResult::Success {
            final_url, body, ..
        } = result
        else {
            return 0;
        };
        stats.fetched_ok += 1;

        let base = Url::parse(&final_url).or_else(|_| Url::parse(url));
        let Ok(base) = base else {
            return 0;
        };

        let links = extract_links(&body, &base, frontier.crawled_set(), self.domain);
        frontier.merge(links)
    }
}

//! Statistics collected during a discovery run
//!
//! This module provides the counters filled in by the orchestrator and
//! scheduler, and a plain-text printer for them.

use crate::state::FailureKind;
use crate::validate::Rejection;
use serde::Serialize;

/// Crawl fetch failures by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FailureCounts {
    pub timeout: usize,
    pub network: usize,
    pub http_status: usize,
    pub non_html: usize,
}

impl FailureCounts {
    pub fn total(&self) -> usize {
        self.timeout + self.network + self.http_status + self.non_html
    }
}

/// Validation rejections by reason
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RejectionCounts {
    pub blocked: usize,
    pub http_status: usize,
    pub too_short: usize,
    pub unreachable: usize,
}

impl RejectionCounts {
    pub fn total(&self) -> usize {
        self.blocked + self.http_status + self.too_short + self.unreachable
    }
}

/// Discovery run statistics summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrawlStatistics {
    /// Sitemap documents parsed / failed
    pub sitemaps_parsed: usize,
    pub sitemaps_failed: usize,

    /// Candidate URLs contributed by sitemaps
    pub sitemap_urls: usize,

    /// Fixed seed URLs queued
    pub seed_urls: usize,

    /// Externally supplied URLs accepted into the found set
    pub pre_seeded: usize,

    /// Size of the found set after draining
    pub found: usize,

    /// Pages fetched (or attempted) during the crawl
    pub crawled: usize,

    /// Crawl fetches that produced parseable markup
    pub fetched_ok: usize,

    pub failures: FailureCounts,

    /// Queued URLs dropped because robots.txt disallows them
    pub robots_skipped: usize,

    pub batches: usize,

    /// URLs re-probed by the validator
    pub validation_sample: usize,
    pub validation_accepted: usize,
    pub rejections: RejectionCounts,

    /// Accepted URLs that reached scoring
    pub scored: usize,

    /// URLs in the final output
    pub selected: usize,

    pub duration_ms: u64,
}

impl CrawlStatistics {
    pub fn record_failure(&mut self, kind: FailureKind) {
        match kind {
            FailureKind::Timeout => self.failures.timeout += 1,
            FailureKind::Network => self.failures.network += 1,
            FailureKind::HttpStatus => self.failures.http_status += 1,
            FailureKind::NonHtml => self.failures.non_html += 1,
        }
    }

    pub fn record_rejection(&mut self, rejection: &Rejection) {
        match rejection {
            Rejection::Blocked => self.rejections.blocked += 1,
            Rejection::HttpStatus { .. } => self.rejections.http_status += 1,
            Rejection::TooShort { .. } => self.rejections.too_short += 1,
            Rejection::Unreachable => self.rejections.unreachable += 1,
        }
    }

    /// Percentage of crawl fetches that produced markup
    pub fn fetch_success_rate(&self) -> f64 {
        if self.crawled == 0 {
            0.0
        } else {
            (self.fetched_ok as f64 / self.crawled as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Discovery Statistics ===\n");

    println!("Sources:");
    println!(
        "  Sitemaps parsed: {} ({} failed)",
        stats.sitemaps_parsed, stats.sitemaps_failed
    );
    println!("  Sitemap URLs: {}", stats.sitemap_urls);
    println!("  Seed URLs: {}", stats.seed_urls);
    if stats.pre_seeded > 0 {
        println!("  Pre-seeded URLs: {}", stats.pre_seeded);
    }
    println!();

    println!("Crawl:");
    println!("  URLs found: {}", stats.found);
    println!("  Pages crawled: {} in {} batches", stats.crawled, stats.batches);
    println!(
        "  Fetched OK: {} ({:.1}%)",
        stats.fetched_ok,
        stats.fetch_success_rate()
    );
    if stats.robots_skipped > 0 {
        println!("  Skipped by robots.txt: {}", stats.robots_skipped);
    }
    println!();

    if stats.failures.total() > 0 {
        println!("Fetch Failures:");
        let mut failures = vec![
            ("timeout", stats.failures.timeout),
            ("network", stats.failures.network),
            ("http_status", stats.failures.http_status),
            ("non_html", stats.failures.non_html),
        ];
        failures.retain(|(_, count)| *count > 0);
        failures.sort_by(|a, b| b.1.cmp(&a.1));
        for (kind, count) in failures {
            println!("  {}: {}", kind, count);
        }
        println!();
    }

    println!("Validation:");
    println!(
        "  Accepted: {} / {} sampled",
        stats.validation_accepted, stats.validation_sample
    );
    if stats.rejections.total() > 0 {
        println!("  Rejected blocked: {}", stats.rejections.blocked);
        println!("  Rejected HTTP error: {}", stats.rejections.http_status);
        println!("  Rejected too short: {}", stats.rejections.too_short);
        println!("  Rejected unreachable: {}", stats.rejections.unreachable);
    }
    println!();

    println!(
        "Selected {} of {} scored URLs in {:.1}s",
        stats.selected,
        stats.scored,
        stats.duration_ms as f64 / 1000.0
    );
}

//! Robots.txt handling module
//!
//! One robots.txt is fetched per discovery run. It supplies sitemap
//! locations to the resolver and, when politeness is enabled, allow checks
//! and crawl-delay to the scheduler.

mod parser;

pub use parser::ParsedRobots;

use crate::url::SiteTarget;
use reqwest::Client;

/// Fetches and parses `/robots.txt` for a target
///
/// Never fails: a network error, a non-success status or an unreadable
/// body all yield [`ParsedRobots::allow_all`].
pub async fn fetch_robots(client: &Client, target: &SiteTarget) -> ParsedRobots {
    let Some(url) = target.join("/robots.txt") else {
        return ParsedRobots::allow_all();
    };

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("robots.txt unavailable at {}: {}", url, e);
            return ParsedRobots::allow_all();
        }
    };

    if !response.status().is_success() {
        tracing::debug!("robots.txt at {} returned {}", url, response.status());
        return ParsedRobots::allow_all();
    }

    match response.text().await {
        Ok(body) => {
            let robots = ParsedRobots::from_content(&body);
            tracing::debug!(
                "Parsed robots.txt for {} ({} sitemap directives)",
                target.domain(),
                robots.sitemaps().len()
            );
            robots
        }
        Err(e) => {
            tracing::debug!("Failed to read robots.txt body from {}: {}", url, e);
            ParsedRobots::allow_all()
        }
    }
}

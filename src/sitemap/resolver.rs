//! Sitemap discovery and recursive resolution

use crate::robots::ParsedRobots;
use crate::sitemap::parser::parse_sitemap;
use crate::url::{canonicalize_url, is_english_locale, is_us_locale, same_domain, SiteTarget};
use flate2::read::GzDecoder;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::io::Read;

/// Locations probed when robots.txt announces no sitemap
pub const FALLBACK_SITEMAPS: [&str; 3] = ["/sitemap.xml", "/sitemap_index.xml", "/sitemap.xml.gz"];

/// Result of resolving every sitemap reachable from a site
#[derive(Debug, Clone, Default)]
pub struct SitemapDiscovery {
    /// Same-domain, English, US-inferred page URLs in discovery order
    pub urls: Vec<String>,

    /// Sitemap documents fetched and parsed
    pub sitemaps_parsed: usize,

    /// Sitemap documents that could not be fetched or parsed
    pub sitemaps_failed: usize,
}

/// Walks sitemaps starting from robots.txt directives or the fallbacks
pub struct SitemapResolver<'a> {
    client: &'a Client,
    target: &'a SiteTarget,
}

impl<'a> SitemapResolver<'a> {
    pub fn new(client: &'a Client, target: &'a SiteTarget) -> Self {
        Self { client, target }
    }

    /// Initial worklist: robots.txt `Sitemap:` values, else the fallbacks
    ///
    /// Relative directive values are resolved against the base URL.
    pub fn entry_points(&self, robots: &ParsedRobots) -> Vec<String> {
        let declared: Vec<String> = robots
            .sitemaps()
            .iter()
            .filter_map(|value| self.target.base_url().join(value).ok())
            .map(|url| url.to_string())
            .collect();

        if !declared.is_empty() {
            return declared;
        }

        FALLBACK_SITEMAPS
            .iter()
            .filter_map(|path| self.target.join(path))
            .collect()
    }

    /// Resolves all sitemaps reachable from `robots`
    ///
    /// Nested sitemaps are followed with no depth limit; a visited set is
    /// the only cycle guard. Fetch and parse failures are logged and skipped.
    pub async fn resolve(&self, robots: &ParsedRobots) -> SitemapDiscovery {
        let mut discovery = SitemapDiscovery::default();
        let mut seen_urls: HashSet<String> = HashSet::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut worklist: VecDeque<String> = self.entry_points(robots).into();

        while let Some(sitemap_url) = worklist.pop_front() {
            if !visited.insert(sitemap_url.clone()) {
                continue;
            }

            let Some(bytes) = self.fetch_document(&sitemap_url).await else {
                discovery.sitemaps_failed += 1;
                continue;
            };

            let doc = match parse_sitemap(&sitemap_url, &bytes) {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::debug!("{}", e);
                    discovery.sitemaps_failed += 1;
                    continue;
                }
            };
            discovery.sitemaps_parsed += 1;

            let mut accepted = 0;
            for loc in &doc.locs {
                let Some(url) = self.accept(loc) else {
                    continue;
                };
                if seen_urls.insert(url.clone()) {
                    discovery.urls.push(url);
                    accepted += 1;
                }
            }

            for nested in doc.nested {
                if !visited.contains(&nested) {
                    worklist.push_back(nested);
                }
            }

            tracing::debug!(
                "Sitemap {}: {} locs, {} accepted, {} queued",
                sitemap_url,
                doc.locs.len(),
                accepted,
                worklist.len()
            );
        }

        tracing::info!(
            "Found {} URLs from {} sitemaps ({} failed)",
            discovery.urls.len(),
            discovery.sitemaps_parsed,
            discovery.sitemaps_failed
        );
        discovery
    }

    /// Canonicalizes a `loc` value and applies the domain and locale filters
    fn accept(&self, loc: &str) -> Option<String> {
        let url = canonicalize_url(loc).ok()?.to_string();
        let keep = same_domain(&url, self.target.domain())
            && is_english_locale(&url)
            && is_us_locale(&url);
        keep.then_some(url)
    }

    /// Fetches a sitemap body, gunzipping `.gz` documents
    async fn fetch_document(&self, url: &str) -> Option<Vec<u8>> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Failed to fetch sitemap {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Sitemap {} returned {}", url, response.status());
            return None;
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                tracing::debug!("Failed to read sitemap {}: {}", url, e);
                return None;
            }
        };

        if is_gzip_path(url) {
            Some(gunzip_or_raw(bytes))
        } else {
            Some(bytes)
        }
    }
}

/// True if the URL path (ignoring any query) ends in `.gz`
fn is_gzip_path(url: &str) -> bool {
    match ::url::Url::parse(url) {
        Ok(parsed) => parsed.path().ends_with(".gz"),
        Err(_) => url.ends_with(".gz"),
    }
}

/// Decompresses gzip data; on failure the input is returned untouched
///
/// Servers often send `.gz` sitemaps with `Content-Encoding: gzip`, in
/// which case the client has already decoded them.
fn gunzip_or_raw(bytes: Vec<u8>) -> Vec<u8> {
    let mut decoder = GzDecoder::new(bytes.as_slice());
    let mut out = Vec::new();
    match decoder.read_to_end(&mut out) {
        Ok(_) => out,
        Err(e) => {
            tracing::debug!("Sitemap gunzip failed ({}), using raw bytes", e);
            bytes
        }
    }
}

//! Sitemap discovery
//!
//! Sitemap locations come from robots.txt `Sitemap:` directives, falling
//! back to the conventional paths. Sitemap indexes are followed recursively
//! and gzip-compressed documents are decoded.

mod parser;
mod resolver;

pub use parser::{parse_sitemap, SitemapDocument};
pub use resolver::{SitemapDiscovery, SitemapResolver, FALLBACK_SITEMAPS};

//! Crawler module for policy page discovery
//!
//! This module contains the core discovery logic, including:
//! - The frontier of found, crawled and pending URLs
//! - HTTP fetching
//! - HTML link extraction
//! - Batch scheduling with politeness delays
//! - Overall run orchestration

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod scheduler;

pub use coordinator::{
    discover, seed_urls, DiscoveryReport, DiscoveryRequest, Orchestrator, INSURANCE_SEED_PATHS,
    POLICY_SEED_PATHS, US_SEED_PATHS,
};
pub use fetcher::{build_http_client, fetch_page, is_binary_content_type, FetchResult};
pub use frontier::{Frontier, FrontierBatch};
pub use parser::extract_links;
pub use scheduler::{effective_delay, Scheduler};

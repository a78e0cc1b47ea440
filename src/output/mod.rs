//! Output module for discovery results and reports
//!
//! This module handles:
//! - Recording and printing run statistics
//! - Generating markdown reports
//! - Serializing results as JSON

mod json;
mod markdown;
pub mod stats;

pub use json::{format_report_json, format_url_list_json, write_report_json};
pub use markdown::{format_markdown_report, generate_markdown_report};
pub use stats::{print_statistics, CrawlStatistics, FailureCounts, RejectionCounts};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

//! Markdown report generation
//!
//! This module renders a discovery report as a human-readable markdown
//! document: the ranked URLs, the run statistics and the rejected sample.

use crate::crawler::DiscoveryReport;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report to `output_path`
pub fn generate_markdown_report(report: &DiscoveryReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a discovery report as markdown
pub fn format_markdown_report(report: &DiscoveryReport) -> String {
    let stats = &report.statistics;
    let mut md = String::new();

    md.push_str(&format!("# Policy Pages for {}\n\n", report.domain));

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", report.finished_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {:.1} seconds\n\n",
        stats.duration_ms as f64 / 1000.0
    ));

    md.push_str("## Ranked URLs\n\n");
    if report.selected.is_empty() {
        md.push_str("No policy pages found.\n\n");
    } else {
        md.push_str("| # | Score | URL |\n");
        md.push_str("|---|-------|-----|\n");
        for (i, scored) in report.selected.iter().enumerate() {
            md.push_str(&format!("| {} | {} | {} |\n", i + 1, scored.score, scored.url));
        }
        md.push('\n');
    }

    md.push_str("## Crawl Statistics\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Sitemap URLs | {} |\n", stats.sitemap_urls));
    md.push_str(&format!("| Seed URLs | {} |\n", stats.seed_urls));
    md.push_str(&format!("| URLs found | {} |\n", stats.found));
    md.push_str(&format!("| Pages crawled | {} |\n", stats.crawled));
    md.push_str(&format!("| Fetched OK | {} |\n", stats.fetched_ok));
    md.push_str(&format!("| Fetch failures | {} |\n", stats.failures.total()));
    md.push_str(&format!("| Skipped by robots.txt | {} |\n", stats.robots_skipped));
    md.push_str(&format!("| Validation sample | {} |\n", stats.validation_sample));
    md.push_str(&format!("| Validation accepted | {} |\n", stats.validation_accepted));
    md.push_str(&format!("| Selected | {} |\n\n", stats.selected));

    if !report.rejected.is_empty() {
        md.push_str("## Rejected Candidates\n\n");
        md.push_str("| URL | Reason |\n");
        md.push_str("|-----|--------|\n");
        for validation in report.rejected.iter().take(50) {
            if let Some(rejection) = &validation.rejection {
                md.push_str(&format!("| {} | {} |\n", validation.url, rejection));
            }
        }
        if report.rejected.len() > 50 {
            md.push_str(&format!("\n... and {} more\n", report.rejected.len() - 50));
        }
        md.push('\n');
    }

    md
}

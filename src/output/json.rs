//! JSON rendering of discovery reports

use crate::crawler::DiscoveryReport;
use crate::output::OutputResult;
use serde::Serialize;
use std::path::Path;

/// The compact result shape: just the domain and ranked URLs
#[derive(Debug, Serialize)]
struct UrlList<'a> {
    domain: &'a str,
    urls: &'a [String],
}

/// Serializes the ranked URL list
pub fn format_url_list_json(report: &DiscoveryReport) -> OutputResult<String> {
    let list = UrlList {
        domain: &report.domain,
        urls: &report.urls,
    };
    Ok(serde_json::to_string_pretty(&list)?)
}

/// Serializes the full report, including statistics and sets
pub fn format_report_json(report: &DiscoveryReport) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the full JSON report to `output_path`
pub fn write_report_json(report: &DiscoveryReport, output_path: &Path) -> OutputResult<()> {
    std::fs::write(output_path, format_report_json(report)?)?;
    Ok(())
}

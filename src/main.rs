//! Policy-Scout main entry point
//!
//! This is the command-line interface for the Policy-Scout discovery crawler.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use policy_scout::config::{load_config_with_hash, Config};
use policy_scout::crawler::{seed_urls, DiscoveryReport, DiscoveryRequest, Orchestrator};
use policy_scout::output::{
    format_report_json, format_url_list_json, generate_markdown_report, print_statistics,
};
use policy_scout::SiteTarget;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Output format for the ranked URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One URL per line
    Text,
    /// Domain and ranked URLs as JSON
    Json,
    /// The full report as JSON, including statistics
    Report,
}

/// Policy-Scout: a polite policy-page discovery crawler
///
/// Policy-Scout crawls an e-commerce site within a fixed page budget and
/// prints the pages most likely to hold its shipping, return and insurance
/// policies, best first.
#[derive(Parser, Debug)]
#[command(name = "policy-scout")]
#[command(version)]
#[command(about = "A polite policy-page discovery crawler", long_about = None)]
struct Cli {
    /// Domain or URL of the site to search (e.g. shop.example)
    #[arg(value_name = "DOMAIN")]
    domain: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of URLs to return
    #[arg(short, long)]
    limit: Option<usize>,

    /// Maximum number of pages to crawl
    #[arg(long)]
    max_pages: Option<usize>,

    /// Additional same-domain URL to consider without crawling (repeatable)
    #[arg(long = "seed", value_name = "URL")]
    seeds: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write a markdown report to this path
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Print run statistics after the results
    #[arg(long)]
    stats: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with_all = ["stats", "report"])]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let target = SiteTarget::from_domain(&cli.domain)
        .with_context(|| format!("Invalid domain: {}", cli.domain))?;

    let mut request = DiscoveryRequest::new(target, &config).with_pre_seeded(cli.seeds.clone());
    if let Some(max_pages) = cli.max_pages {
        request = request.with_max_pages(max_pages);
    }
    if let Some(limit) = cli.limit {
        if limit == 0 {
            bail!("--limit must be at least 1");
        }
        request = request.with_limit(limit);
    }

    if cli.dry_run {
        handle_dry_run(&config, &request);
        return Ok(());
    }

    handle_discovery(config, &request, &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only results.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("policy_scout=info,warn"),
            1 => EnvFilter::new("policy_scout=debug,info"),
            2 => EnvFilter::new("policy_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective settings and seeds
fn handle_dry_run(config: &Config, request: &DiscoveryRequest) {
    println!("=== Policy-Scout Dry Run ===\n");

    println!("Target:");
    println!("  Domain: {}", request.target.domain());
    println!("  Base URL: {}", request.target.base_url());

    println!("\nCrawler Configuration:");
    println!("  Max pages: {}", request.max_pages);
    println!("  Batch size: {}", config.crawler.batch_size);
    println!("  Request timeout: {}ms", config.crawler.request_timeout_ms);
    println!("  Politeness delay: {}ms", config.crawler.politeness_delay_ms);
    println!("  Max crawl delay: {}ms", config.crawler.max_crawl_delay_ms);
    println!("  Respect robots.txt: {}", config.crawler.respect_robots);

    println!("\nSelection:");
    println!("  Limit: {}", request.limit);
    println!("  Category cap: {}", config.selection.category_cap);
    println!("  Minimum score: {}", config.selection.min_score);
    println!("  Validation sample: {}", config.validation.sample_size);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    let seeds = seed_urls(&request.target);
    println!("\nSeed URLs ({}):", seeds.len());
    for seed in &seeds {
        println!("  - {}", seed);
    }

    if !request.pre_seeded.is_empty() {
        println!("\nPre-seeded URLs ({}):", request.pre_seeded.len());
        for url in &request.pre_seeded {
            println!("  - {}", url);
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Runs discovery and prints the results
async fn handle_discovery(config: Config, request: &DiscoveryRequest, cli: &Cli) -> Result<()> {
    let orchestrator = Orchestrator::new(config).context("Failed to build HTTP client")?;
    let report = orchestrator.run(request).await;

    print_results(&report, cli.format)?;

    if let Some(path) = &cli.report {
        generate_markdown_report(&report, path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        tracing::info!("Report written to: {}", path.display());
    }

    if cli.stats {
        println!();
        print_statistics(&report.statistics);
    }

    Ok(())
}

fn print_results(report: &DiscoveryReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            if report.urls.is_empty() {
                tracing::warn!("No policy pages found for {}", report.domain);
            }
            for url in &report.urls {
                println!("{}", url);
            }
        }
        OutputFormat::Json => println!("{}", format_url_list_json(report)?),
        OutputFormat::Report => println!("{}", format_report_json(report)?),
    }
    Ok(())
}

//! Integration tests for discovery runs
//!
//! These tests use wiremock to stand up mock storefronts and drive the
//! whole pipeline: robots.txt, sitemaps, crawling, validation and ranking.

use flate2::write::GzEncoder;
use flate2::Compression;
use policy_scout::config::Config;
use policy_scout::crawler::{seed_urls, DiscoveryReport, DiscoveryRequest, Orchestrator};
use policy_scout::validate::Rejection;
use policy_scout::SiteTarget;
use std::collections::HashSet;
use std::io::Write;
use wiremock::matchers::{any, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Default settings with no politeness delay and short timeouts
fn test_config() -> Config {
    let mut config = Config::default();
    config.crawler.politeness_delay_ms = 0;
    config.crawler.request_timeout_ms = 2_000;
    config.crawler.connect_timeout_ms = 500;
    config.validation.timeout_ms = 2_000;
    config
}

fn target_for(server: &MockServer) -> SiteTarget {
    let url = url::Url::parse(&server.uri()).expect("Failed to parse mock server URI");
    SiteTarget::from_base_url(url).expect("Failed to build target")
}

/// An HTML page long enough to pass content validation
fn policy_page(title: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title,
        "<p>Orders ship within two business days.</p>".repeat(20)
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn urlset(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("<url><loc>{}</loc></url>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        entries
    )
}

fn sitemap_index(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("<sitemap><loc>{}</loc></sitemap>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</sitemapindex>"#,
        entries
    )
}

async fn mount_robots(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page_path: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(policy_page(page_path)))
        .mount(server)
        .await;
}

async fn mount_sitemap(server: &MockServer, sitemap_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(sitemap_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

async fn run(config: Config, request: &DiscoveryRequest) -> DiscoveryReport {
    let orchestrator = Orchestrator::new(config).expect("Failed to create orchestrator");
    orchestrator.run(request).await
}

fn assert_frontier_invariants(report: &DiscoveryReport, max_pages: usize) {
    assert!(
        report.crawled.len() <= max_pages,
        "crawled {} pages with a budget of {}",
        report.crawled.len(),
        max_pages
    );

    let crawled: HashSet<&String> = report.crawled.iter().collect();
    assert_eq!(crawled.len(), report.crawled.len(), "a URL was crawled twice");

    let found: HashSet<&String> = report.found.iter().collect();
    assert_eq!(found.len(), report.found.len(), "a URL was found twice");
    assert!(crawled.is_subset(&found), "a crawled URL was never found");

    assert!(report.urls.len() <= report.found.len());
}

#[tokio::test]
async fn test_sitemap_urls_filtered_and_ranked() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, format!("User-agent: *\nAllow: /\nSitemap: {}/sitemap.xml", base)).await;
    mount_sitemap(
        &server,
        "/sitemap.xml",
        urlset(&[
            format!("{}/shipping-policy", base),
            format!("{}/fr/returns", base),
            format!("{}/en-gb/returns", base),
            "https://elsewhere.example/shipping-policy".to_string(),
        ]),
    )
    .await;
    mount_page(&server, "/shipping-policy").await;

    // Filtered locales are never probed
    Mock::given(method("GET"))
        .and(path("/fr/returns"))
        .respond_with(html(policy_page("Retours")))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config();
    let request = DiscoveryRequest::new(target_for(&server), &config).with_max_pages(5);
    let report = run(config, &request).await;

    let shipping = format!("{}/shipping-policy", base);
    assert!(report.found.contains(&shipping));
    assert!(!report.found.iter().any(|u| u.contains("/fr/")));
    assert!(!report.found.iter().any(|u| u.contains("/en-gb/")));
    assert!(!report.found.iter().any(|u| u.contains("elsewhere.example")));

    assert_eq!(report.urls, vec![shipping]);
    assert_eq!(report.statistics.sitemaps_parsed, 1);
    assert_eq!(report.statistics.sitemap_urls, 1);
    assert_eq!(report.crawled.len(), 5);
    assert_frontier_invariants(&report, 5);
}

#[tokio::test]
async fn test_zero_budget_makes_no_requests() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config();
    let request = DiscoveryRequest::new(target_for(&server), &config).with_max_pages(0);
    let report = run(config, &request).await;

    assert!(report.urls.is_empty());
    assert!(report.found.is_empty());
    assert!(report.crawled.is_empty());
}

#[tokio::test]
async fn test_unreachable_site_degrades_to_empty_result() {
    let target = SiteTarget::from_domain("http://127.0.0.1:1").unwrap();
    let config = test_config();
    let request = DiscoveryRequest::new(target, &config).with_max_pages(5);
    let report = run(config, &request).await;

    assert!(report.urls.is_empty());
    assert_eq!(report.crawled.len(), 5);
    assert_eq!(report.statistics.fetched_ok, 0);
    assert_eq!(report.statistics.failures.total(), 5);
    assert_eq!(report.statistics.sitemaps_parsed, 0);
    assert!(report
        .rejected
        .iter()
        .all(|v| v.rejection == Some(Rejection::Unreachable)));
    assert_frontier_invariants(&report, 5);
}

#[tokio::test]
async fn test_budget_bounds_crawl_of_linked_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    let links: String = (0..20)
        .map(|i| format!(r#"<a href="/page-{}">Page {}</a>"#, i, i))
        .collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!("<html><body>{}</body></html>", links)))
        .mount(&server)
        .await;

    // Linked pages point back at pages already found
    Mock::given(method("GET"))
        .and(path_regex(r"^/page-\d+$"))
        .respond_with(html(format!(
            r#"<html><body><a href="/">Home</a><a href="/page-0">First</a><a href="{}/page-19">Last</a></body></html>"#,
            base
        )))
        .mount(&server)
        .await;

    let mut config = test_config();
    config.crawler.batch_size = 7;
    let request = DiscoveryRequest::new(target_for(&server), &config).with_max_pages(40);
    let report = run(config, &request).await;

    assert_eq!(report.crawled.len(), 40);
    assert!(report.found.contains(&format!("{}/page-19", base)));
    assert_eq!(report.statistics.batches, 6);
    assert_frontier_invariants(&report, 40);
}

#[tokio::test]
async fn test_links_found_on_home_page_are_candidates() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><body>
                <a href="/pages/shipping-info">Shipping</a>
                <a href="/pages/shipping-info#rates">Rates</a>
                <a href="https://elsewhere.example/returns">Partner returns</a>
                <a href="mailto:help@shop.example">Mail us</a>
                <form action="{}/account/orders"></form>
            </body></html>"#,
            base
        )))
        .mount(&server)
        .await;
    mount_page(&server, "/pages/shipping-info").await;

    let config = test_config();
    let request = DiscoveryRequest::new(target_for(&server), &config).with_max_pages(1);
    let report = run(config, &request).await;

    let shipping_info = format!("{}/pages/shipping-info", base);
    assert_eq!(report.crawled, vec![format!("{}/", base)]);
    assert!(report.found.contains(&shipping_info));
    assert!(report.found.contains(&format!("{}/account/orders", base)));
    assert!(!report.found.iter().any(|u| u.contains("elsewhere.example")));
    assert!(report.urls.contains(&shipping_info));
}

#[tokio::test]
async fn test_robots_disallow_respected() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, "User-agent: *\nDisallow: /returns\n".to_string()).await;

    Mock::given(method("GET"))
        .and(path("/returns"))
        .respond_with(html(policy_page("Returns")))
        .expect(0)
        .mount(&server)
        .await;
    mount_page(&server, "/us/returns").await;

    let config = test_config();
    let max_pages = 60;
    let request = DiscoveryRequest::new(target_for(&server), &config).with_max_pages(max_pages);
    let report = run(config, &request).await;

    let returns = format!("{}/returns", base);
    assert!(report.found.contains(&returns));
    assert!(!report.crawled.contains(&returns));
    assert!(!report.urls.contains(&returns));
    assert!(report.urls.contains(&format!("{}/us/returns", base)));
    assert_eq!(report.statistics.robots_skipped, 1);
    assert_eq!(
        report.crawled.len(),
        seed_urls(&target_for(&server)).len() - 1
    );
    assert_frontier_invariants(&report, max_pages);
}

#[tokio::test]
async fn test_robots_ignored_when_disabled() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, "User-agent: *\nDisallow: /\n".to_string()).await;
    mount_page(&server, "/returns").await;

    let mut config = test_config();
    config.crawler.respect_robots = false;
    let request = DiscoveryRequest::new(target_for(&server), &config).with_max_pages(60);
    let report = run(config, &request).await;

    let returns = format!("{}/returns", base);
    assert!(report.crawled.contains(&returns));
    assert_eq!(report.urls, vec![returns]);
    assert_eq!(report.statistics.robots_skipped, 0);
}

#[tokio::test]
async fn test_gzip_sitemap() {
    let server = MockServer::start().await;
    let base = server.uri();

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(urlset(&[format!("{}/policies/refund-policy", base)]).as_bytes())
        .unwrap();
    let compressed = encoder.finish().unwrap();

    mount_robots(&server, format!("Sitemap: {}/sitemap.xml.gz", base)).await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml.gz"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(compressed)
                .insert_header("content-type", "application/x-gzip"),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/policies/refund-policy").await;

    let config = test_config();
    let request = DiscoveryRequest::new(target_for(&server), &config).with_max_pages(1);
    let report = run(config, &request).await;

    assert_eq!(report.statistics.sitemaps_parsed, 1);
    assert_eq!(
        report.urls,
        vec![format!("{}/policies/refund-policy", base)]
    );
}

#[tokio::test]
async fn test_cyclic_sitemap_index_terminates() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, format!("Sitemap: {}/index-a.xml", base)).await;

    for (sitemap_path, body) in [
        (
            "/index-a.xml",
            sitemap_index(&[format!("{}/index-b.xml", base), format!("{}/index-a.xml", base)]),
        ),
        (
            "/index-b.xml",
            sitemap_index(&[format!("{}/index-a.xml", base), format!("{}/pages.xml", base)]),
        ),
        ("/pages.xml", urlset(&[format!("{}/help/shipping", base)])),
    ] {
        Mock::given(method("GET"))
            .and(path(sitemap_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;
    }
    mount_page(&server, "/help/shipping").await;

    let config = test_config();
    let request = DiscoveryRequest::new(target_for(&server), &config).with_max_pages(1);
    let report = run(config, &request).await;

    assert_eq!(report.statistics.sitemaps_parsed, 3);
    assert_eq!(report.urls, vec![format!("{}/help/shipping", base)]);
}

#[tokio::test]
async fn test_validation_rejections() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, format!("Sitemap: {}/sitemap.xml", base)).await;
    mount_sitemap(
        &server,
        "/sitemap.xml",
        urlset(&[
            format!("{}/shipping-policy", base),
            format!("{}/returns-policy", base),
            format!("{}/refund-policy", base),
            format!("{}/exchange-policy", base),
        ]),
    )
    .await;
    mount_page(&server, "/shipping-policy").await;

    Mock::given(method("GET"))
        .and(path("/returns-policy"))
        .respond_with(html("<html><body>Coming soon</body></html>".to_string()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/refund-policy"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/exchange-policy"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", "/Blocked?from=exchange"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Blocked"))
        .respond_with(html(policy_page("Access denied")))
        .mount(&server)
        .await;

    let config = test_config();
    let request = DiscoveryRequest::new(target_for(&server), &config).with_max_pages(1);
    let report = run(config, &request).await;

    assert_eq!(report.urls, vec![format!("{}/shipping-policy", base)]);

    let rejection_of = |suffix: &str| {
        report
            .rejected
            .iter()
            .find(|v| v.url == format!("{}{}", base, suffix))
            .and_then(|v| v.rejection)
    };
    assert!(matches!(
        rejection_of("/returns-policy"),
        Some(Rejection::TooShort { .. })
    ));
    assert_eq!(
        rejection_of("/refund-policy"),
        Some(Rejection::HttpStatus { status: 500 })
    );
    assert_eq!(rejection_of("/exchange-policy"), Some(Rejection::Blocked));

    // Unmocked seeds answer 404
    assert!(report.statistics.rejections.http_status >= 2);
    assert_eq!(report.statistics.rejections.too_short, 1);
    assert_eq!(report.statistics.rejections.blocked, 1);
    assert_eq!(report.statistics.validation_accepted, 1);
}

#[tokio::test]
async fn test_pre_seeded_urls_are_validated_not_crawled() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/help-center/returns-policy"))
        .respond_with(html(policy_page("Returns")))
        .expect(1)
        .mount(&server)
        .await;

    let pre_seeded = format!("{}/help-center/returns-policy", base);
    let config = test_config();
    let request = DiscoveryRequest::new(target_for(&server), &config)
        .with_max_pages(60)
        .with_pre_seeded(vec![
            format!("{}?utm_source=mail", pre_seeded),
            "https://elsewhere.example/returns".to_string(),
        ]);
    let report = run(config, &request).await;

    assert_eq!(report.statistics.pre_seeded, 1);
    assert!(report.found.contains(&pre_seeded));
    assert!(!report.crawled.contains(&pre_seeded));
    assert!(!report.found.iter().any(|u| u.contains("elsewhere.example")));
    assert_eq!(report.urls, vec![pre_seeded]);
}

#[tokio::test]
async fn test_category_cap_and_ordering() {
    let server = MockServer::start().await;
    let base = server.uri();

    let paths = [
        "/shipping-policy",
        "/returns-policy",
        "/refund-policy",
        "/exchange-policy",
        "/contact-us",
    ];
    mount_robots(&server, format!("Sitemap: {}/sitemap.xml", base)).await;
    mount_sitemap(
        &server,
        "/sitemap.xml",
        urlset(&paths.map(|p| format!("{}{}", base, p))),
    )
    .await;
    for page_path in paths {
        mount_page(&server, page_path).await;
    }

    let config = test_config();
    let request = DiscoveryRequest::new(target_for(&server), &config).with_max_pages(1);
    let report = run(config.clone(), &request).await;

    assert_eq!(
        report.urls,
        vec![
            format!("{}/returns-policy", base),
            format!("{}/shipping-policy", base),
            format!("{}/contact-us", base),
        ]
    );
    for pair in report.selected.windows(2) {
        assert!(
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].url < pair[1].url),
            "{:?} ranked before {:?}",
            pair[0],
            pair[1]
        );
    }

    let request = request.with_limit(1);
    let report = run(config, &request).await;
    assert_eq!(report.urls, vec![format!("{}/returns-policy", base)]);
}

#[tokio::test]
async fn test_equal_scores_break_ties_by_url() {
    let server = MockServer::start().await;
    let base = server.uri();

    let paths = ["/refund-policy", "/exchange-policy"];
    mount_robots(&server, format!("Sitemap: {}/sitemap.xml", base)).await;
    mount_sitemap(
        &server,
        "/sitemap.xml",
        urlset(&paths.map(|p| format!("{}{}", base, p))),
    )
    .await;
    for page_path in paths {
        mount_page(&server, page_path).await;
    }

    let config = test_config();
    let request = DiscoveryRequest::new(target_for(&server), &config).with_max_pages(1);
    let report = run(config, &request).await;

    assert_eq!(report.selected.len(), 2);
    assert_eq!(report.selected[0].score, report.selected[1].score);
    assert_eq!(
        report.urls,
        vec![
            format!("{}/exchange-policy", base),
            format!("{}/refund-policy", base),
        ]
    );
}

//! HTML parser for extracting links
//!
//! # Link Extraction Rules
//!
//! **Sources:**
//! - `<a href="...">`
//! - `<form action="...">`
//! - any element carrying `data-url="..."`
//!
//! **Excluded:**
//! - empty and fragment-only values
//! - `javascript:`, `mailto:`, `tel:` and `data:` values
//! - anything not resolving to HTTP(S)
//! - URLs outside the target domain
//! - URLs already crawled
//!
//! Query strings and fragments are stripped. `rel="nofollow"` links are
//! followed.

use crate::url::{resolve_link, same_domain};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

const LINK_SELECTOR: &str = "a[href], form[action], [data-url]";

/// Attribute values an element contributes, in attribute priority order
fn link_values<'a>(element: &ElementRef<'a>) -> Vec<&'a str> {
    let el = element.value();
    let mut values = Vec::with_capacity(2);
    match el.name() {
        "a" => values.extend(el.attr("href")),
        "form" => values.extend(el.attr("action")),
        _ => {}
    }
    values.extend(el.attr("data-url"));
    values
}

/// Extracts crawlable links from a page
///
/// Returns deduplicated canonical URLs in document order. Malformed markup
/// yields whatever the lenient parser recovers.
///
/// # Example
///
/// ```
/// use policy_scout::crawler::extract_links;
/// use std::collections::HashSet;
/// use url::Url;
///
/// let html = r#"<a href="/pages/returns?ref=nav">Returns</a><a href="mailto:x@shop.example">Mail</a>"#;
/// let base = Url::parse("https://shop.example/help").unwrap();
/// let links = extract_links(html, &base, &HashSet::new(), "shop.example");
/// assert_eq!(links, vec!["https://shop.example/pages/returns".to_string()]);
/// ```
pub fn extract_links(
    html: &str,
    base_url: &Url,
    crawled: &HashSet<String>,
    domain: &str,
) -> Vec<String> {
    let Ok(selector) = Selector::parse(LINK_SELECTOR) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        for value in link_values(&element) {
            let Some(url) = resolve_link(value, base_url) else {
                continue;
            };
            let url = url.to_string();
            if !same_domain(&url, domain) || crawled.contains(&url) {
                continue;
            }
            if seen.insert(url.clone()) {
                links.push(url);
            }
        }
    }

    links
}

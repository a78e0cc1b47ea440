use crate::UrlError;
use url::Url;

/// Schemes that never lead to a crawlable page
const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Canonicalizes a URL for the crawl frontier
///
/// # Canonicalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything other than HTTP and HTTPS
/// 3. Remove the query string
/// 4. Remove the fragment
///
/// Host lowercasing and dot-segment removal come from the URL parser itself.
///
/// # Examples
///
/// ```
/// use policy_scout::url::canonicalize_url;
///
/// let url = canonicalize_url("https://Shop.Example/help/../returns?ref=nav#top").unwrap();
/// assert_eq!(url.as_str(), "https://shop.example/returns");
/// ```
pub fn canonicalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    canonicalize(url)
}

fn canonicalize(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

/// Resolves a link found on a page into a canonical absolute URL
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only values
/// - javascript:, mailto:, tel: schemes and data: URIs
/// - values that cannot be joined onto the base URL
/// - non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_lowercase();
    if SKIPPED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    canonicalize(absolute).ok()
}

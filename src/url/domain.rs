use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use policy_scout::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether a URL belongs to the target domain
///
/// The check is a case-insensitive substring match of `domain` against the
/// URL's host, so `help.shop.example` and `www.shop.example` both belong to
/// `shop.example`. Unparseable URLs never match.
///
/// # Examples
///
/// ```
/// use policy_scout::url::same_domain;
///
/// assert!(same_domain("https://help.Shop.example/faq", "shop.example"));
/// assert!(!same_domain("https://other.example/faq", "shop.example"));
/// assert!(!same_domain("not a url", "shop.example"));
/// ```
pub fn same_domain(url: &str, domain: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => match extract_domain(&parsed) {
            Some(host) => host.contains(&domain.to_lowercase()),
            None => false,
        },
        Err(_) => false,
    }
}

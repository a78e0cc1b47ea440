//! URL handling module for Policy-Scout
//!
//! This module provides the site target model, URL canonicalization,
//! same-domain membership and locale inference.

mod domain;
mod locale;
mod normalize;

pub use domain::{extract_domain, same_domain};
pub use locale::{is_english_locale, is_us_locale, NON_ENGLISH_LOCALES, NON_US_MARKERS, US_MARKERS};
pub use normalize::{canonicalize_url, resolve_link};

use crate::{UrlError, UrlResult};
use url::Url;

/// The site a discovery run is aimed at
///
/// All filtering and scoring is relative to `domain`. Requests are built by
/// joining paths onto `base_url`, which is `https://{domain}/` unless an
/// explicit base URL is supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteTarget {
    domain: String,
    base_url: Url,
}

impl SiteTarget {
    /// Builds a target from user input
    ///
    /// Accepts a bare domain (`shop.example`) or a full URL
    /// (`https://shop.example/any/path`). Only the host (and, for full URLs,
    /// the scheme and port) are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use policy_scout::url::SiteTarget;
    ///
    /// let target = SiteTarget::from_domain("Shop.Example").unwrap();
    /// assert_eq!(target.domain(), "shop.example");
    /// assert_eq!(target.base_url().as_str(), "https://shop.example/");
    /// ```
    pub fn from_domain(input: &str) -> UrlResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(UrlError::MissingDomain);
        }

        let candidate = if input.contains("://") {
            input.to_string()
        } else {
            format!("https://{}", input)
        };

        let url = Url::parse(&candidate).map_err(|e| UrlError::Parse(e.to_string()))?;
        Self::from_base_url(url)
    }

    /// Builds a target from an explicit base URL
    ///
    /// The path, query and fragment are discarded; the domain is the
    /// lowercased host.
    pub fn from_base_url(mut url: Url) -> UrlResult<Self> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        let domain = extract_domain(&url).ok_or(UrlError::MissingDomain)?;

        url.set_path("/");
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self {
            domain,
            base_url: url,
        })
    }

    /// The registrable domain all filters are relative to
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Root URL of the site, always ending in `/`
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins an absolute path such as `/help` onto the base URL
    pub fn join(&self, path: &str) -> Option<String> {
        self.base_url.join(path).ok().map(|u| u.to_string())
    }
}

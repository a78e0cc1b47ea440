/// Classification of fetches that produced no links
use std::fmt;

/// Why a crawled URL contributed nothing to the frontier
///
/// Every failure is absorbed by the crawl loop: the URL stays in the crawled
/// set and simply yields no links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Request exceeded the configured timeout
    Timeout,

    /// DNS, connection or TLS failure
    Network,

    /// Server answered with a 4xx or 5xx status
    HttpStatus,

    /// Response body was not markup we can extract links from
    NonHtml,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Network => "network",
            Self::HttpStatus => "http_status",
            Self::NonHtml => "non_html",
        }
    }

    /// Maps a reqwest error onto a failure kind
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_status() {
            Self::HttpStatus
        } else {
            Self::Network
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

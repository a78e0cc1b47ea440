/// Crawl phase definitions for the frontier state machine
///
/// A discovery run moves through `Idle → Seeded → Draining → Done`.
use std::fmt;

/// Represents the current phase of a frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Frontier created, nothing queued yet
    Idle,

    /// Sitemap and seed URLs are queued, no batch issued yet
    Seeded,

    /// Batches are being fetched
    Draining,

    /// Queue empty or page budget exhausted
    Done,
}

impl CrawlPhase {
    /// Returns true if `next` is a legal successor of this phase
    ///
    /// `Seeded → Done` covers runs whose queue is empty or whose budget is
    /// zero before the first batch.
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Seeded)
                | (Self::Seeded, Self::Draining)
                | (Self::Seeded, Self::Done)
                | (Self::Draining, Self::Draining)
                | (Self::Draining, Self::Done)
        )
    }

    /// Returns true once no further fetches will be issued
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Seeded => "seeded",
            Self::Draining => "draining",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

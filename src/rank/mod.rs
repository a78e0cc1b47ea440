//! Relevance ranking for discovered URLs
//!
//! This module contains:
//! - Keyword tables and weights (immutable scoring configuration)
//! - The pure URL scorer
//! - The category limiter applied at final selection

mod category;
mod keywords;
mod scorer;

pub use category::{default_categories, Category, CategoryLimiter};
pub use keywords::{KeywordTables, ScoreWeights};
pub use scorer::Scorer;

use serde::Serialize;
use std::cmp::Ordering;

/// A URL paired with its relevance score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredUrl {
    pub score: u32,
    pub url: String,
}

// Higher scores sort first; equal scores fall back to ascending URL order
impl Ord for ScoredUrl {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.url.cmp(&other.url))
    }
}

impl PartialOrd for ScoredUrl {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Builds the final ranked selection
///
/// 1. Drops URLs scoring below `min_score`
/// 2. Sorts by descending score, ties broken by ascending URL
/// 3. Applies the per-category caps
/// 4. Truncates to `limit`
pub fn select(
    mut scored: Vec<ScoredUrl>,
    limiter: &CategoryLimiter,
    min_score: u32,
    limit: usize,
) -> Vec<ScoredUrl> {
    scored.retain(|s| s.score >= min_score);
    scored.sort();
    scored.dedup_by(|a, b| a.url == b.url);

    let mut selected = limiter.apply(&scored);
    selected.truncate(limit);
    selected
}

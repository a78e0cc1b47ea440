//! Per-category caps applied to the final ranked list

use crate::rank::ScoredUrl;
use std::collections::HashMap;

/// A semantic bucket defined by a keyword set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
}

impl Category {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// True if any keyword occurs in the (already lowercased) URL
    fn matches(&self, lower_url: &str) -> bool {
        self.keywords.iter().any(|k| lower_url.contains(k.as_str()))
    }
}

/// The built-in categories, in priority order
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(
            "policy_help",
            &[
                "shipping", "returns", "refund", "exchange", "help", "support", "faq", "policy",
                "warranty",
            ],
        ),
        Category::new(
            "insurance_protection",
            &[
                "insurance",
                "protection",
                "coverage",
                "assurance",
                "extended-warranty",
                "protection-plan",
                "damage-protection",
                "accident-protection",
            ],
        ),
        Category::new(
            "cart_shopping",
            &[
                "cart", "checkout", "payment", "order", "shopping", "account", "login", "basket",
                "purchase",
            ],
        ),
        Category::new(
            "contact_about",
            &["contact", "about", "customer-care", "assistance"],
        ),
    ]
}

/// Caps how many URLs of each category survive final selection
///
/// Categories are checked in order and the first match wins; URLs matching
/// no category always pass.
#[derive(Debug, Clone)]
pub struct CategoryLimiter {
    categories: Vec<Category>,
    cap: usize,
}

impl CategoryLimiter {
    pub fn new(categories: Vec<Category>, cap: usize) -> Self {
        Self { categories, cap }
    }

    /// The built-in categories with the given cap
    pub fn with_cap(cap: usize) -> Self {
        Self::new(default_categories(), cap)
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Returns the name of the first matching category, if any
    pub fn classify(&self, url: &str) -> Option<&str> {
        let lower = url.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.matches(&lower))
            .map(|c| c.name.as_str())
    }

    /// Filters a ranked list, keeping at most `cap` URLs per category
    ///
    /// The input order is preserved; callers pass the list already sorted
    /// by `(score desc, url asc)` so the best URLs of each category win.
    pub fn apply(&self, ranked: &[ScoredUrl]) -> Vec<ScoredUrl> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut kept = Vec::with_capacity(ranked.len());

        for scored in ranked {
            match self.classify(&scored.url) {
                Some(category) => {
                    let count = counts.entry(category).or_insert(0);
                    if *count < self.cap {
                        *count += 1;
                        tracing::debug!(
                            "Kept {} in category {} ({}/{})",
                            scored.url,
                            category,
                            count,
                            self.cap
                        );
                        kept.push(scored.clone());
                    } else {
                        tracing::debug!("Dropped {}: category {} is full", scored.url, category);
                    }
                }
                None => {
                    tracing::debug!("Kept {} (uncategorized)", scored.url);
                    kept.push(scored.clone());
                }
            }
        }

        tracing::info!("Category limits applied: {:?}", counts);
        kept
    }
}

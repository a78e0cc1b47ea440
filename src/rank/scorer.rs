//! Deterministic keyword-weighted relevance scoring of URL strings

use crate::rank::keywords::KeywordTables;
use crate::rank::ScoredUrl;

/// Scores URLs against an immutable set of keyword tables
///
/// Scoring looks only at the URL string: it is pure, idempotent and
/// independent of fetch order.
#[derive(Debug, Clone)]
pub struct Scorer {
    tables: KeywordTables,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(KeywordTables::default())
    }
}

/// Counts non-overlapping occurrences of every keyword in `haystack`
fn occurrences(haystack: &str, keywords: &[String]) -> i64 {
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(|k| haystack.matches(k.as_str()).count() as i64)
        .sum()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|n| !n.is_empty() && haystack.contains(n.as_str()))
}

impl Scorer {
    /// Creates a scorer; keywords are matched case-insensitively
    pub fn new(tables: KeywordTables) -> Self {
        Self {
            tables: tables.lowercased(),
        }
    }

    pub fn tables(&self) -> &KeywordTables {
        &self.tables
    }

    /// Scores a URL
    ///
    /// Every occurrence of a tier keyword adds that tier's weight, a content
    /// path or US marker adds a flat bonus, and every noise occurrence
    /// subtracts the penalty. The result is floored at zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use policy_scout::rank::Scorer;
    ///
    /// let scorer = Scorer::default();
    /// assert!(scorer.score("https://shop.example/shipping-policy") >= 5);
    /// assert_eq!(scorer.score("https://example.org/"), 0);
    /// ```
    pub fn score(&self, url: &str) -> u32 {
        let lower = url.to_lowercase();
        let t = &self.tables;
        let w = &t.weights;

        let mut score = 0i64;
        score += occurrences(&lower, &t.primary) * w.primary;
        score += occurrences(&lower, &t.secondary) * w.secondary;
        score += occurrences(&lower, &t.path) * w.path;
        score += occurrences(&lower, &t.cart) * w.cart;
        score += occurrences(&lower, &t.insurance) * w.insurance;

        if contains_any(&lower, &t.content_paths) {
            score += w.content_path_bonus;
        }

        if contains_any(&lower, &t.us_markers) {
            score += w.us_bonus;
        }

        score -= occurrences(&lower, &t.noise) * w.noise_penalty;

        score.clamp(0, u32::MAX as i64) as u32
    }

    /// Scores a set of URLs, returning them in input order
    pub fn score_all<I, S>(&self, urls: I) -> Vec<ScoredUrl>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        urls.into_iter()
            .map(|url| {
                let url: String = url.into();
                ScoredUrl {
                    score: self.score(&url),
                    url,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_primary(words: &[&str]) -> Scorer {
        let mut tables = KeywordTables::empty();
        tables.primary = words.iter().map(|s| s.to_string()).collect();
        Scorer::new(tables)
    }

    #[test]
    fn test_shipping_policy_scores_primary() {
        let scorer = Scorer::default();
        // shipping 5 + policy 3 + shipping-policy 4 + shop 2
        assert_eq!(scorer.score("https://shop.example/shipping-policy"), 14);
    }

    #[test]
    fn test_plain_home_page_is_zero() {
        let scorer = Scorer::default();
        assert_eq!(scorer.score("https://example.org/"), 0);
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        let scorer = Scorer::default();
        let url = "https://shop.example/pages/returns-exchanges";
        let first = scorer.score(url);
        for _ in 0..10 {
            assert_eq!(scorer.score(url), first);
        }
    }

    #[test]
    fn test_occurrences_are_additive() {
        let scorer = only_primary(&["refund"]);
        assert_eq!(scorer.score("https://a.example/refund"), 5);
        assert_eq!(scorer.score("https://a.example/refund/refund"), 10);
        assert_eq!(scorer.score("https://a.example/refund/refund/refund"), 15);
    }

    #[test]
    fn test_case_insensitive() {
        let scorer = only_primary(&["Shipping"]);
        assert_eq!(scorer.score("https://a.example/SHIPPING"), 5);
    }

    #[test]
    fn test_monotonic_in_positive_matches() {
        let scorer = Scorer::default();
        let base = scorer.score("https://a.example/x?q");
        let more = scorer.score("https://a.example/refund?q");
        let most = scorer.score("https://a.example/refund/warranty?q");
        assert!(base <= more);
        assert!(more <= most);
    }

    #[test]
    fn test_content_path_bonus_is_flat() {
        let mut tables = KeywordTables::empty();
        tables.content_paths = vec!["/pages/".to_string(), "/help/".to_string()];
        let scorer = Scorer::new(tables);
        assert_eq!(scorer.score("https://a.example/pages/x"), 2);
        assert_eq!(scorer.score("https://a.example/pages/help/pages/x"), 2);
    }

    #[test]
    fn test_us_bonus() {
        let scorer = Scorer::default();
        let generic = scorer.score("https://a.example/help/shipping");
        let us = scorer.score("https://a.example/us/help/shipping");
        assert_eq!(us, generic + 3);
    }

    #[test]
    fn test_noise_penalty_per_occurrence() {
        let mut tables = KeywordTables::empty();
        tables.primary = vec!["returns".to_string()];
        tables.noise = vec!["/blog/".to_string()];
        let scorer = Scorer::new(tables);
        assert_eq!(scorer.score("https://a.example/blog/returns"), 3);
        // "/blog/blog/" holds one non-overlapping "/blog/" plus a "blog/" tail
        assert_eq!(scorer.score("https://a.example/blog/blog/returns"), 3);
        assert_eq!(scorer.score("https://a.example/blog/x/blog/returns"), 1);
    }

    #[test]
    fn test_floored_at_zero() {
        let scorer = Scorer::default();
        assert_eq!(scorer.score("https://a.example/search?q=1#x"), 0);
    }

    #[test]
    fn test_insurance_outweighs_primary() {
        let scorer = Scorer::default();
        let insurance = scorer.score("https://a.example/insurance");
        let refund = scorer.score("https://a.example/refund");
        assert!(insurance > refund);
    }

    #[test]
    fn test_score_all_keeps_order() {
        let scorer = only_primary(&["returns"]);
        let scored = scorer.score_all(vec!["https://a.example/x", "https://a.example/returns"]);
        assert_eq!(scored[0].score, 0);
        assert_eq!(scored[1].score, 5);
        assert_eq!(scored[1].url, "https://a.example/returns");
    }
}

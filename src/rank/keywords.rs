//! Keyword tables and weights used by the relevance scorer
//!
//! The tables are plain data: they can be loaded from the `[scoring]` config
//! section or built in tests, and are never mutated once a [`Scorer`] holds
//! them.
//!
//! [`Scorer`]: crate::rank::Scorer

use serde::Deserialize;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Keyword lists for each scoring tier
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeywordTables {
    /// Core policy terms
    pub primary: Vec<String>,

    /// Help and support terms
    pub secondary: Vec<String>,

    /// Compound path terms such as `return-policy`
    pub path: Vec<String>,

    /// Cart and shopping terms
    pub cart: Vec<String>,

    /// Insurance and protection terms
    pub insurance: Vec<String>,

    /// Path segments of conventional content pages (flat bonus)
    #[serde(rename = "content-paths")]
    pub content_paths: Vec<String>,

    /// Markers of an explicitly US page (flat bonus)
    #[serde(rename = "us-markers")]
    pub us_markers: Vec<String>,

    /// Patterns of catalog, search, auth and editorial pages (penalized)
    pub noise: Vec<String>,

    pub weights: ScoreWeights,
}

/// Score contribution of each tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub primary: i64,
    pub secondary: i64,
    pub path: i64,
    pub cart: i64,
    pub insurance: i64,
    #[serde(rename = "content-path-bonus")]
    pub content_path_bonus: i64,
    #[serde(rename = "us-bonus")]
    pub us_bonus: i64,
    #[serde(rename = "noise-penalty")]
    pub noise_penalty: i64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            primary: 5,
            secondary: 3,
            path: 4,
            cart: 2,
            insurance: 6,
            content_path_bonus: 2,
            us_bonus: 3,
            noise_penalty: 2,
        }
    }
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            primary: strings(&[
                "shipping", "delivery", "returns", "return", "refund", "exchange", "exchanges",
                "warranty", "guarantee",
            ]),
            secondary: strings(&[
                "policy",
                "policies",
                "help",
                "support",
                "faq",
                "faqs",
                "customer-service",
                "customer-care",
                "care",
                "assistance",
                "contact",
                "about",
            ]),
            path: strings(&[
                "return-policy",
                "returns-policy",
                "shipping-policy",
                "delivery-policy",
                "how-to-return",
                "howtoreturn",
                "returns-exchanges",
                "shipping-delivery",
                "help-center",
                "customer-care",
                "customer-service",
                "support-center",
            ]),
            cart: strings(&[
                "cart",
                "shopping-cart",
                "basket",
                "checkout",
                "payment",
                "order",
                "purchase",
                "buy",
                "add-to-cart",
                "shopping",
                "store",
                "shop",
                "product",
                "collection",
                "wishlist",
                "favorites",
                "account",
                "login",
            ]),
            insurance: strings(&[
                "insurance",
                "protection",
                "coverage",
                "assurance",
                "secure",
                "safety",
                "extended-warranty",
                "extended-warranties",
                "protection-plan",
                "protection-plans",
                "accident-protection",
                "damage-protection",
                "loss-protection",
                "theft-protection",
                "water-protection",
                "drop-protection",
                "screen-protection",
                "device-protection",
                "product-protection",
                "purchase-protection",
                "shipping-insurance",
                "delivery-insurance",
                "return-insurance",
                "refund-protection",
                "money-back-guarantee",
                "satisfaction-guarantee",
                "lifetime-warranty",
                "limited-warranty",
                "full-warranty",
                "partial-warranty",
                "repair-warranty",
                "replacement-warranty",
                "upgrade-protection",
                "trade-in-protection",
            ]),
            content_paths: strings(&["/pages/", "/help/", "/support/", "/policies/"]),
            us_markers: strings(&["/us/", "/en-us/"]),
            noise: strings(&[
                "/products/",
                "/product/",
                "/collections/",
                "/search",
                "/signin",
                "/signup",
                "/register",
                "/blog/",
                "/news/",
                "/press/",
                "?",
                "#",
            ]),
            weights: ScoreWeights::default(),
        }
    }
}

impl KeywordTables {
    /// Tables with no keywords at all; every URL scores zero
    pub fn empty() -> Self {
        Self {
            primary: Vec::new(),
            secondary: Vec::new(),
            path: Vec::new(),
            cart: Vec::new(),
            insurance: Vec::new(),
            content_paths: Vec::new(),
            us_markers: Vec::new(),
            noise: Vec::new(),
            weights: ScoreWeights::default(),
        }
    }

    /// Every table paired with its config key, for validation and reporting
    pub fn named_tables(&self) -> [(&'static str, &[String]); 8] {
        [
            ("primary", self.primary.as_slice()),
            ("secondary", self.secondary.as_slice()),
            ("path", self.path.as_slice()),
            ("cart", self.cart.as_slice()),
            ("insurance", self.insurance.as_slice()),
            ("content-paths", self.content_paths.as_slice()),
            ("us-markers", self.us_markers.as_slice()),
            ("noise", self.noise.as_slice()),
        ]
    }

    /// Returns a copy with every keyword lowercased
    pub(crate) fn lowercased(&self) -> Self {
        let lower = |v: &[String]| v.iter().map(|s| s.to_lowercase()).collect::<Vec<_>>();
        Self {
            primary: lower(self.primary.as_slice()),
            secondary: lower(self.secondary.as_slice()),
            path: lower(self.path.as_slice()),
            cart: lower(self.cart.as_slice()),
            insurance: lower(self.insurance.as_slice()),
            content_paths: lower(self.content_paths.as_slice()),
            us_markers: lower(self.us_markers.as_slice()),
            noise: lower(self.noise.as_slice()),
            weights: self.weights,
        }
    }
}

//! Locale inference from URL path markers

/// Path segments that mark a non-English locale
pub const NON_ENGLISH_LOCALES: &[&str] = &[
    "/fr/", "/es/", "/de/", "/it/", "/jp/", "/zh/", "/pt/", "/ru/", "/mx/", "/cl/", "/cr/",
    "/ar/", "/br/", "/co/", "/pe/", "/uy/", "/ve/", "/uk/", "/tr/", "/kz/", "/kh/", "/nl/",
    "/sv/", "/da/",
];

/// Path markers that explicitly target the US
pub const US_MARKERS: &[&str] = &["/us/", "/en-us/", "/us-en/", "/en_us/", "/us_en/"];

/// Path markers that explicitly target a region other than the US
pub const NON_US_MARKERS: &[&str] = &[
    "/en-gb/", "/en-au/", "/en-ca/", "/en-nz/", "/en-eu/", "/en-it/", "/en-ch/", "/gb/", "/au/",
    "/ca/", "/nz/", "/fr/", "/fr-", "/de/", "/es/", "/it/", "/pt/", "/ru/", "/zh/", "/jp/",
    "/kr/", "/mx/", "/br/", "/ar/", "/in/",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Returns false iff the URL carries a non-English locale segment
///
/// # Examples
///
/// ```
/// use policy_scout::url::is_english_locale;
///
/// assert!(is_english_locale("https://shop.example/shipping-policy"));
/// assert!(!is_english_locale("https://shop.example/fr/returns"));
/// ```
pub fn is_english_locale(url: &str) -> bool {
    !contains_any(&url.to_lowercase(), NON_ENGLISH_LOCALES)
}

/// Infers whether a URL targets US visitors
///
/// An explicit US marker wins, then an explicit non-US marker rejects.
/// URLs without any marker are assumed to be generic and therefore US.
///
/// # Examples
///
/// ```
/// use policy_scout::url::is_us_locale;
///
/// assert!(is_us_locale("https://shop.example/en-us/returns"));
/// assert!(!is_us_locale("https://shop.example/en-gb/returns"));
/// assert!(is_us_locale("https://shop.example/returns"));
/// ```
pub fn is_us_locale(url: &str) -> bool {
    let lower = url.to_lowercase();

    if contains_any(&lower, US_MARKERS) {
        return true;
    }

    if contains_any(&lower, NON_US_MARKERS) {
        return false;
    }

    true
}

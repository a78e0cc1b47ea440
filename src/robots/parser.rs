//! Robots.txt parser implementation
//!
//! Allow/disallow matching is delegated to the robotstxt crate; crawl-delay
//! and sitemap directives are read here since the matcher ignores them.

use robotstxt::DefaultMatcher;
use std::time::Duration;

/// Parsed robots.txt data
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content (empty string means allow all)
    content: String,
    allow_all: bool,
    /// `Sitemap:` values in file order, unresolved
    sitemaps: Vec<String>,
}

/// Splits a robots.txt line into a lowercased key and trimmed value
///
/// Trailing `#` comments are removed from the value.
fn split_directive(line: &str) -> Option<(String, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once(':')?;
    let value = match value.find('#') {
        Some(idx) => &value[..idx],
        None => value,
    };
    Some((key.trim().to_lowercase(), value.trim()))
}

impl ParsedRobots {
    /// Parses raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        let sitemaps = content
            .lines()
            .filter_map(|line| {
                // Sitemap values are URLs, so only strip a comment that
                // follows whitespace
                let trimmed = line.trim();
                let (key, value) = trimmed.split_once(':')?;
                if !key.trim().eq_ignore_ascii_case("sitemap") {
                    return None;
                }
                let value = value.split(" #").next().unwrap_or_default().trim();
                (!value.is_empty()).then(|| value.to_string())
            })
            .collect();

        Self {
            content: content.to_string(),
            allow_all: false,
            sitemaps,
        }
    }

    /// A permissive policy, used when robots.txt is missing or unreachable
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
            sitemaps: Vec::new(),
        }
    }

    pub fn is_allow_all(&self) -> bool {
        self.allow_all
    }

    /// Sitemap locations announced by the file
    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    /// Checks whether `url` may be fetched by `user_agent`
    ///
    /// `url` may be absolute or a bare path.
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.allow_all || self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }

    /// Crawl-delay for `user_agent`
    ///
    /// A group naming the agent wins over the `*` group. Agent names match
    /// case-insensitively as a prefix of the product token.
    pub fn crawl_delay(&self, user_agent: &str) -> Option<Duration> {
        if self.allow_all {
            return None;
        }

        let agent = user_agent.to_lowercase();
        let mut group: Vec<String> = Vec::new();
        let mut in_agent_lines = false;
        let mut wildcard = None;
        let mut specific = None;

        for line in self.content.lines() {
            let Some((key, value)) = split_directive(line) else {
                continue;
            };

            if key == "user-agent" {
                // A user-agent line after rules opens a new group
                if !in_agent_lines {
                    group.clear();
                }
                group.push(value.to_lowercase());
                in_agent_lines = true;
                continue;
            }
            in_agent_lines = false;

            if key != "crawl-delay" {
                continue;
            }
            let Ok(seconds) = value.parse::<f64>() else {
                continue;
            };
            let Ok(delay) = Duration::try_from_secs_f64(seconds) else {
                continue;
            };

            if group
                .iter()
                .any(|ua| ua != "*" && !ua.is_empty() && agent.starts_with(ua.as_str()))
            {
                specific = Some(delay);
            } else if group.iter().any(|ua| ua == "*") {
                wildcard = Some(delay);
            }
        }

        specific.or(wildcard)
    }
}

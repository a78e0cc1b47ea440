use crate::config::types::{
    Config, CrawlerConfig, SelectionConfig, UserAgentConfig, ValidationConfig,
};
use crate::rank::KeywordTables;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_validation_config(&config.validation)?;
    validate_selection_config(&config.selection)?;
    validate_keyword_tables(&config.scoring)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_pages == 0 is allowed: the run returns an empty list without fetching

    if config.batch_size < 1 || config.batch_size > 100 {
        return Err(ConfigError::Validation(format!(
            "batch_size must be between 1 and 100, got {}",
            config.batch_size
        )));
    }

    if config.request_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_ms must be >= 100ms, got {}ms",
            config.request_timeout_ms
        )));
    }

    if config.connect_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_ms must be >= 100ms, got {}ms",
            config.connect_timeout_ms
        )));
    }

    if config.politeness_delay_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "politeness_delay_ms must be >= 100ms, got {}ms",
            config.politeness_delay_ms
        )));
    }

    if config.max_crawl_delay_ms < config.politeness_delay_ms {
        return Err(ConfigError::Validation(format!(
            "max_crawl_delay_ms ({}ms) must be >= politeness_delay_ms ({}ms)",
            config.max_crawl_delay_ms, config.politeness_delay_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if let Some(value) = &config.override_value {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user-agent override cannot be empty".to_string(),
            ));
        }
        return Ok(());
    }

    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates the content validation pass settings
fn validate_validation_config(config: &ValidationConfig) -> Result<(), ConfigError> {
    if config.sample_size < 1 {
        return Err(ConfigError::Validation(
            "validation sample_size must be >= 1".to_string(),
        ));
    }

    if config.timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "validation timeout_ms must be >= 100ms, got {}ms",
            config.timeout_ms
        )));
    }

    if config.blocked_marker.is_empty() {
        return Err(ConfigError::Validation(
            "blocked_marker cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates final selection settings
fn validate_selection_config(config: &SelectionConfig) -> Result<(), ConfigError> {
    if config.limit < 1 {
        return Err(ConfigError::Validation(
            "selection limit must be >= 1".to_string(),
        ));
    }

    if config.category_cap < 1 {
        return Err(ConfigError::Validation(
            "category_cap must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Rejects empty keywords, which would match at every position of a URL
fn validate_keyword_tables(tables: &KeywordTables) -> Result<(), ConfigError> {
    for (name, keywords) in tables.named_tables() {
        if keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "scoring table '{}' contains an empty keyword",
                name
            )));
        }
    }
    Ok(())
}

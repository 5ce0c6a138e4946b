use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::strategy::SiteProfile;
use crate::ConfigError;
use regex::Regex;
use tracing::warn;
use url::Url;

/// Upper bound on workers per domain
const MAX_CONCURRENCY: usize = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    for profile in &config.site {
        validate_site_profile(profile)?;
    }
    Ok(())
}

/// Checks that a domain root is an absolute HTTP(S) URL with a host
pub fn validate_domain_root(root: &str) -> Result<(), ConfigError> {
    let url = Url::parse(root)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid domain '{}': {}", root, e)))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Domain '{}' must be an http(s) URL with a host",
            root
        )));
    }
    Ok(())
}

/// Keeps the domain roots a run can crawl
///
/// Invalid roots are logged and skipped so they do not block the rest.
/// Fails only when no usable root is left.
pub fn usable_domain_roots(roots: &[String]) -> Result<Vec<String>, ConfigError> {
    let usable: Vec<String> = roots
        .iter()
        .filter(|root| match validate_domain_root(root) {
            Ok(()) => true,
            Err(e) => {
                warn!("Skipping domain: {}", e);
                false
            }
        })
        .cloned()
        .collect();

    if usable.is_empty() {
        return Err(ConfigError::Validation(
            "at least one valid domain is required".to_string(),
        ));
    }
    Ok(usable)
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, config.concurrency
        )));
    }

    if config.max_urls < 1 {
        return Err(ConfigError::Validation(
            "max-urls must be >= 1".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "results-path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates one `[[site]]` entry
fn validate_site_profile(profile: &SiteProfile) -> Result<(), ConfigError> {
    validate_domain_pattern(&profile.domain)?;

    for pattern in profile
        .product_url_patterns
        .iter()
        .chain(&profile.markup_patterns)
    {
        Regex::new(pattern).map_err(|e| {
            ConfigError::InvalidPattern(format!(
                "Site '{}' has an invalid regex '{}': {}",
                profile.domain, pattern, e
            ))
        })?;
    }

    for card in &profile.cards {
        if card.tags.is_empty() || card.class_terms.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Site '{}' has a card rule without tags or class terms",
                profile.domain
            )));
        }
    }

    if profile.content.min_price_elements == Some(0) {
        return Err(ConfigError::Validation(format!(
            "Site '{}': min-price-elements must be >= 1",
            profile.domain
        )));
    }

    Ok(())
}

/// Validates a domain pattern (supports a leading `*.` wildcard)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    let domain = pattern.strip_prefix("*.").unwrap_or(pattern);

    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain pattern '{}' is empty",
            pattern
        )));
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    let well_formed = domain.contains('.')
        && !domain.contains("..")
        && !domain.starts_with(['.', '-'])
        && !domain.ends_with(['.', '-']);
    if !well_formed {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must look like 'example.com' or '*.example.com'",
            pattern
        )));
    }

    Ok(())
}

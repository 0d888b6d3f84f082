use crate::config::types::{Config, CrawlerConfig, PolitenessConfig, ValidatorConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_politeness_config(&config.politeness)?;
    validate_crawler_config(&config.crawler)?;
    validate_validator_config(&config.validator)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates politeness configuration
fn validate_politeness_config(config: &PolitenessConfig) -> Result<(), ConfigError> {
    if config.search_delay_min_ms > config.search_delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "search delay range is inverted: {}ms > {}ms",
            config.search_delay_min_ms, config.search_delay_max_ms
        )));
    }

    if config.validation_delay_min_ms > config.validation_delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "validation delay range is inverted: {}ms > {}ms",
            config.validation_delay_min_ms, config.validation_delay_max_ms
        )));
    }

    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "user_agents must contain at least one entry".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pending_urls < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pending_urls must be >= 1, got {}",
            config.max_pending_urls
        )));
    }

    if config.max_visited_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_visited_pages must be >= 1, got {}",
            config.max_visited_pages
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates validator configuration
fn validate_validator_config(config: &ValidatorConfig) -> Result<(), ConfigError> {
    if config.max_size_mb <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "max_size_mb must be positive, got {}",
            config.max_size_mb
        )));
    }

    if config.sniff_prefix_bytes < 1024 {
        return Err(ConfigError::Validation(format!(
            "sniff_prefix_bytes must be >= 1024, got {}",
            config.sniff_prefix_bytes
        )));
    }

    if config.head_timeout_secs < 1 || config.download_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "validator timeouts must be >= 1 second".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.collection_path.is_empty() {
        return Err(ConfigError::Validation(
            "collection_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

use crate::config::types::{Config, SiteConfig, StorageConfig, WorkerConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on concurrently processed listing pages
const MAX_WORKERS: usize = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_storage_config(&config.storage)?;
    validate_worker_config(&config.workers)?;
    Ok(())
}

/// Validates the target site and HTTP client settings
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.total_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "total_pages must be >= 1, got {}",
            config.total_pages
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates the document store location
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.data_dir.is_empty() {
        return Err(ConfigError::Validation(
            "data_dir cannot be empty".to_string(),
        ));
    }

    validate_identifier("database", &config.database)?;
    validate_identifier("collection", &config.collection)?;

    Ok(())
}

/// Validates the worker pool size
fn validate_worker_config(config: &WorkerConfig) -> Result<(), ConfigError> {
    if let Some(count) = config.count {
        if count < 1 || count > MAX_WORKERS {
            return Err(ConfigError::Validation(format!(
                "workers.count must be between 1 and {}, got {}",
                MAX_WORKERS, count
            )));
        }
    }

    Ok(())
}

/// Database and collection names end up in file names, so keep them plain
fn validate_identifier(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "{} must contain only ASCII letters, digits, '_' or '-', got '{}'",
            field, value
        )));
    }

    Ok(())
}

//! Cinescrape: a paginated movie listing scraper
//!
//! This crate crawls the listing pages of a movie catalogue site, extracts the
//! metadata of every movie linked from them, and upserts each movie into a
//! document collection keyed by its name.

pub mod config;
pub mod crawler;
pub mod movie;
pub mod storage;

use thiserror::Error;

/// Main error type for Cinescrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page job {page} did not finish: {source}")]
    Join {
        page: u32,
        source: tokio::task::JoinError,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Cinescrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, parse_detail, parse_index};
pub use movie::MovieRecord;
pub use storage::{MovieStore, SqliteStorage};

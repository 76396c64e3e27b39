//! Configuration module for Cinescrape
//!
//! Every setting has a built-in default, so a run needs no configuration file.
//! A TOML file may override any subset of the defaults.
//!
//! # Example
//!
//! ```no_run
//! use cinescrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("cinescrape.toml")).unwrap();
//! println!("Crawling {} pages", config.site.total_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, SiteConfig, StorageConfig, WorkerConfig, DEFAULT_BASE_URL, DEFAULT_TOTAL_PAGES,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;

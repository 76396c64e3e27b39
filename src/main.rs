//! Cinescrape main entry point
//!
//! Running with no arguments scrapes every listing page of the default site
//! into the default document store.

use cinescrape::config::{load_config_with_hash, Config};
use cinescrape::crawler::crawl;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Cinescrape: a paginated movie listing scraper
///
/// Fetches each listing page, follows the movie links on it, and upserts the
/// scraped movies into a document collection keyed by movie name.
#[derive(Parser, Debug)]
#[command(name = "cinescrape")]
#[command(version)]
#[command(about = "A paginated movie listing scraper", long_about = None)]
struct Cli {
    /// Optional TOML file overriding the built-in defaults
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    tracing::info!(
        "Scraping {} pages from {} into {}/{}.db ({})",
        config.site.total_pages,
        config.site.base_url,
        config.storage.data_dir,
        config.storage.database,
        config.storage.collection
    );

    match crawl(config).await {
        Ok(_) => {
            tracing::info!("Scrape completed");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cinescrape=info,warn"),
            1 => EnvFilter::new("cinescrape=debug,info"),
            2 => EnvFilter::new("cinescrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

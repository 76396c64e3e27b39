//! Crawler module for page fetching and processing
//!
//! This module contains the scraping pipeline, including:
//! - HTTP fetching that logs and swallows failures
//! - Listing and detail page parsing
//! - Per-page coordination (fetch → parse → store)
//! - Fan-out of page jobs over a bounded worker pool

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, fetch_url, scrape_page, FetchResult};
pub use parser::{parse_detail, parse_index, DetailUrls};
pub use scheduler::{run_pages, PageOutcome, RunSummary};

use crate::config::Config;
use crate::ScrapeError;
use std::time::Instant;

/// Runs a complete scrape
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client
/// 2. Process every listing page in `1..=total_pages` concurrently
/// 3. Wait for all page jobs and log a summary
///
/// Page-level failures are logged and counted, never returned.
///
/// # Returns
///
/// * `Ok(RunSummary)` - All page jobs finished
/// * `Err(ScrapeError)` - The coordinator could not be set up
pub async fn crawl(config: Config) -> Result<RunSummary, ScrapeError> {
    let total_pages = config.site.total_pages;
    let workers = config.workers.resolved_count();

    let coordinator = Coordinator::new(config)?;
    let start_time = Instant::now();

    let summary = run_pages(&coordinator, total_pages, workers).await;

    tracing::info!(
        "Scrape finished in {:?}: {} pages completed, {} failed, {} movies saved",
        start_time.elapsed(),
        summary.pages_completed,
        summary.pages_failed,
        summary.movies_saved
    );

    Ok(summary)
}

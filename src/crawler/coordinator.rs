//! Page coordinator - processing of one listing page
//!
//! A page job fetches one listing page, walks the detail links it contains in
//! order, and fetches, parses and saves each detail page. Jobs share nothing
//! but the immutable configuration and the pooled HTTP client; each opens its
//! own storage handle and releases it when the job ends.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, scrape_page};
use crate::crawler::parser::{parse_detail, parse_index};
use crate::storage::{open_storage, MovieStore};
use crate::ScrapeError;
use reqwest::Client;
use std::sync::Arc;
use url::Url;

/// Processes listing pages against one site and document store
#[derive(Clone)]
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    base_url: Url,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The scraper configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - Invalid base URL or the HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(&config.site.base_url)?;
        let client = build_http_client(&config.site)?;

        Ok(Self {
            config: Arc::new(config),
            client,
            base_url,
        })
    }

    /// Builds the listing URL for a page number
    pub fn index_url(&self, page: u32) -> String {
        format!(
            "{}/page/{}",
            self.config.site.base_url.trim_end_matches('/'),
            page
        )
    }

    /// Scrapes one listing page and every movie it links to
    ///
    /// # Steps
    ///
    /// 1. Fetch the listing page; a failed fetch yields no detail URLs
    /// 2. Parse the detail URLs in document order
    /// 3. For each detail URL fetch the page, skip it when the fetch failed,
    ///    otherwise parse it and upsert the record
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of movies saved from this page
    /// * `Err(ScrapeError)` - The document store failed; the rest of the page is abandoned
    pub async fn process_page(&self, page: u32) -> Result<usize, ScrapeError> {
        let index_url = self.index_url(page);

        let Some(index_html) = scrape_page(&self.client, &index_url).await else {
            return Ok(0);
        };

        let detail_urls = parse_index(&index_html, &self.base_url);
        drop(index_html);

        let mut storage = open_storage(&self.config.storage)?;
        let mut saved = 0;

        for detail_url in detail_urls {
            let Some(detail_html) = scrape_page(&self.client, &detail_url).await else {
                continue;
            };

            let movie = parse_detail(&detail_html);
            tracing::info!("Get detail data.");
            tracing::debug!("Parsed {:?} from {}", movie.name, detail_url);

            tracing::info!("Saving data to storage.");
            storage.save_movie(&movie)?;
            tracing::info!("Data saved successfully.");
            saved += 1;
        }

        Ok(saved)
    }
}

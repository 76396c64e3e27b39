//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client from the site configuration
//! - GET requests classified into success, bad status or transport failure
//! - Logging every attempt and failure; failures never propagate to callers

use crate::config::SiteConfig;
use reqwest::{Client, StatusCode};
use std::error::Error as _;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered 200 and the body was read
    Success {
        /// Page body content
        body: String,
    },

    /// The server answered with any status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Connection, DNS, TLS, timeout or body decoding failure
    NetworkError {
        /// Error description including its source chain
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The site configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use cinescrape::config::SiteConfig;
/// use cinescrape::crawler::build_http_client;
///
/// let client = build_http_client(&SiteConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &SiteConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues a single GET request and classifies the outcome
///
/// No retries: every failure is reported once.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchResult::NetworkError {
                error: describe_error(&e),
            }
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success { body },
        Err(e) => FetchResult::NetworkError {
            error: describe_error(&e),
        },
    }
}

/// Fetches a page body, logging and swallowing every failure
///
/// # Returns
///
/// * `Some(body)` - The server answered 200
/// * `None` - Any other status or a transport failure; already logged
pub async fn scrape_page(client: &Client, url: &str) -> Option<String> {
    tracing::info!("scraping {}...", url);

    match fetch_url(client, url).await {
        FetchResult::Success { body } => Some(body),
        FetchResult::HttpError { status_code } => {
            tracing::error!(
                "Get invalid status code {} while scraping {}",
                status_code,
                url
            );
            None
        }
        FetchResult::NetworkError { error } => {
            tracing::error!("Error occurred while scraping {}: {}", url, error);
            None
        }
    }
}

/// Formats an error together with its whole source chain
fn describe_error(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

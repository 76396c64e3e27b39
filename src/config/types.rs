use serde::Deserialize;

/// Default site crawled when no configuration file overrides it
pub const DEFAULT_BASE_URL: &str = "https://static1.scrape.cuiqingcai.com";

/// Number of listing pages crawled per run
pub const DEFAULT_TOTAL_PAGES: u32 = 10;

/// Main configuration structure for Cinescrape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub workers: WorkerConfig,
}

/// Target site and HTTP client behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL that listing paths and detail links are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Listing pages `1..=total_pages` are crawled
    #[serde(rename = "total-pages")]
    pub total_pages: u32,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Skip TLS certificate verification
    #[serde(rename = "accept-invalid-certs")]
    pub accept_invalid_certs: bool,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            total_pages: DEFAULT_TOTAL_PAGES,
            user_agent: format!("cinescrape/{}", env!("CARGO_PKG_VERSION")),
            accept_invalid_certs: true,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Document store location
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one SQLite file per database
    #[serde(rename = "data-dir")]
    pub data_dir: String,

    /// Database name; the file is `{data_dir}/{database}.db`
    pub database: String,

    /// Collection the movie documents are written to
    pub collection: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            database: "movies".to_string(),
            collection: "movies".to_string(),
        }
    }
}

/// Page worker pool sizing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkerConfig {
    /// Maximum number of pages processed at once; defaults to the host's
    /// available parallelism
    pub count: Option<usize>,
}

impl WorkerConfig {
    /// Resolves the pool size, falling back to one worker per logical core
    pub fn resolved_count(&self) -> usize {
        self.count.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

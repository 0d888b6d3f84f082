use serde::Deserialize;

/// Main configuration structure for pdfscout
///
/// Every section is optional in the TOML file; missing sections fall back to
/// the built-in defaults so the pipeline can run without a config file at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub politeness: PolitenessConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub validator: ValidatorConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Politeness behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolitenessConfig {
    /// Minimum delay before a search request (milliseconds)
    #[serde(rename = "search-delay-min-ms")]
    pub search_delay_min_ms: u64,

    /// Maximum delay before a search request (milliseconds)
    #[serde(rename = "search-delay-max-ms")]
    pub search_delay_max_ms: u64,

    /// Minimum delay between candidate validations (milliseconds)
    #[serde(rename = "validation-delay-min-ms")]
    pub validation_delay_min_ms: u64,

    /// Maximum delay between candidate validations (milliseconds)
    #[serde(rename = "validation-delay-max-ms")]
    pub validation_delay_max_ms: u64,

    /// Pool of user-agent strings to rotate through
    #[serde(rename = "user-agents")]
    pub user_agents: Vec<String>,
}

impl Default for PolitenessConfig {
    fn default() -> Self {
        Self {
            search_delay_min_ms: 2_000,
            search_delay_max_ms: 5_000,
            validation_delay_min_ms: 500,
            validation_delay_max_ms: 1_500,
            user_agents: default_user_agents(),
        }
    }
}

/// The stock browser user agents rotated when none are configured
pub fn default_user_agents() -> Vec<String> {
    [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:124.0) Gecko/20100101 Firefox/124.0",
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Site crawler configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of URLs pending in the frontier queue
    #[serde(rename = "max-pending-urls")]
    pub max_pending_urls: usize,

    /// Safety ceiling on pages fetched per crawl invocation
    #[serde(rename = "max-visited-pages")]
    pub max_visited_pages: usize,

    /// Timeout for page fetches (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pending_urls: 50,
            max_visited_pages: 200,
            request_timeout_secs: 10,
        }
    }
}

/// URL validator configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Reject documents larger than this (megabytes)
    #[serde(rename = "max-size-mb")]
    pub max_size_mb: f64,

    /// How much of the document body to download for metadata sniffing (bytes)
    #[serde(rename = "sniff-prefix-bytes")]
    pub sniff_prefix_bytes: usize,

    /// Timeout for HEAD requests (seconds)
    #[serde(rename = "head-timeout-secs")]
    pub head_timeout_secs: u64,

    /// Timeout for the partial body download (seconds)
    #[serde(rename = "download-timeout-secs")]
    pub download_timeout_secs: u64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_size_mb: 50.0,
            sniff_prefix_bytes: 100 * 1024,
            head_timeout_secs: 10,
            download_timeout_secs: 15,
        }
    }
}

/// Search backend configuration
///
/// The structured API backend stays disabled until both fields are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    /// Endpoint of the structured search API (Custom-Search-shaped)
    #[serde(rename = "api-endpoint")]
    pub api_endpoint: Option<String>,

    /// API key sent with structured search requests
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the persisted JSON collection
    #[serde(rename = "collection-path")]
    pub collection_path: String,

    /// Path of the categories configuration file
    #[serde(rename = "categories-path")]
    pub categories_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            collection_path: "./pdf_results.json".to_string(),
            categories_path: "./config/categories.json".to_string(),
        }
    }
}

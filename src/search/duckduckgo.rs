//! DuckDuckGo HTML-results backend
//!
//! Scrapes the JavaScript-free results page at `html.duckduckgo.com`.
//! Result anchors wrap the target in a `/l/?uddg=` redirect URL, which is
//! unwrapped to the real destination before the extension filter runs.

use crate::config::CrawlerConfig;
use crate::crawler::build_http_client;
use crate::politeness::Politeness;
use crate::search::{with_filetype_qualifier, Candidate, SearchBackend};
use crate::url::{is_document_url, normalize_candidate};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::Arc;
use url::Url;

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const RESULT_SELECTOR: &str = ".result__a";

/// Search backend scraping the DuckDuckGo HTML results page
pub struct DuckDuckGoSearch {
    client: Client,
    politeness: Arc<Politeness>,
    endpoint: String,
}

impl DuckDuckGoSearch {
    /// Creates the backend with the production endpoint
    pub fn new(
        config: &CrawlerConfig,
        politeness: Arc<Politeness>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config.request_timeout_secs)?,
            politeness,
            endpoint: SEARCH_ENDPOINT.to_string(),
        })
    }

    /// Overrides the results endpoint (mirrors, mock servers in tests)
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Parses result anchors out of a results page body
    fn extract_result_urls(&self, body: &str, limit: usize) -> Vec<Url> {
        let document = Html::parse_document(body);
        let mut results = Vec::new();

        let selector = match Selector::parse(RESULT_SELECTOR) {
            Ok(s) => s,
            Err(_) => return results,
        };

        for element in document.select(&selector) {
            let href = match element.value().attr("href") {
                Some(h) => h,
                None => continue,
            };

            let target = match unwrap_redirect(href) {
                Some(t) => t,
                None => continue,
            };

            let url = match normalize_candidate(&target) {
                Ok(u) => u,
                Err(e) => {
                    tracing::trace!("Dropping unparseable result '{}': {}", target, e);
                    continue;
                }
            };

            if !is_document_url(&url) {
                continue;
            }

            results.push(url);
            if results.len() >= limit {
                break;
            }
        }

        results
    }
}

#[async_trait]
impl SearchBackend for DuckDuckGoSearch {
    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    async fn discover(&self, query: &str, limit: usize) -> Vec<Candidate> {
        self.politeness.delay_search().await;

        let query = with_filetype_qualifier(query);

        let mut request_url = match Url::parse(&self.endpoint) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!("Invalid search endpoint {}: {}", self.endpoint, e);
                return Vec::new();
            }
        };
        request_url.query_pairs_mut().append_pair("q", &query);

        let response = self
            .client
            .get(request_url)
            .header(USER_AGENT, self.politeness.pick_user_agent())
            .header(ACCEPT, "text/html,application/xhtml+xml,application/xml")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(REFERER, "https://duckduckgo.com/")
            .send()
            .await;

        let body = match response {
            Ok(r) if r.status().is_success() => match r.text().await {
                Ok(b) => b,
                Err(e) => {
                    tracing::warn!("Error reading search results: {}", e);
                    return Vec::new();
                }
            },
            Ok(r) => {
                tracing::warn!("Search returned HTTP {}", r.status());
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Error during search: {}", e);
                return Vec::new();
            }
        };

        self.extract_result_urls(&body, limit)
            .into_iter()
            .map(|url| Candidate {
                url,
                backend: self.name(),
            })
            .collect()
    }
}

/// Unwraps DuckDuckGo's `/l/?uddg=` redirect wrapper
///
/// Plain hrefs pass through untouched; wrapped hrefs yield the
/// percent-decoded target, cut before any trailing parameters.
fn unwrap_redirect(href: &str) -> Option<String> {
    let wrapped = match href.find("uddg=") {
        Some(pos) => &href[pos + "uddg=".len()..],
        None => return Some(href.to_string()),
    };

    let encoded = wrapped.split('&').next()?;
    match urlencoding::decode(encoded) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(_) => None,
    }
}

//! Structured search-API backend
//!
//! Queries a Custom-Search-shaped JSON endpoint (`q`/`num` request
//! parameters, `items[].link` response array). The backend is optional:
//! without an endpoint and key in the configuration it reports the missing
//! setup once and yields empty results on every call after that.

use crate::config::{CrawlerConfig, SearchConfig};
use crate::crawler::build_http_client;
use crate::politeness::Politeness;
use crate::search::{with_filetype_qualifier, Candidate, SearchBackend};
use crate::url::{is_document_url, normalize_candidate};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

/// Response shape of the structured search endpoint
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    link: String,
}

/// Search backend for a structured JSON search API
pub struct ApiSearch {
    client: Client,
    politeness: Arc<Politeness>,
    endpoint: Option<String>,
    api_key: Option<String>,
    unconfigured_reported: AtomicBool,
}

impl ApiSearch {
    pub fn new(
        crawler: &CrawlerConfig,
        search: &SearchConfig,
        politeness: Arc<Politeness>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(crawler.request_timeout_secs)?,
            politeness,
            endpoint: search.api_endpoint.clone(),
            api_key: search.api_key.clone(),
            unconfigured_reported: AtomicBool::new(false),
        })
    }

    /// Returns the endpoint and key, reporting missing configuration once
    fn configuration(&self) -> Option<(&str, &str)> {
        match (self.endpoint.as_deref(), self.api_key.as_deref()) {
            (Some(endpoint), Some(key)) => Some((endpoint, key)),
            _ => {
                if !self.unconfigured_reported.swap(true, Ordering::Relaxed) {
                    tracing::warn!(
                        "Structured search API not configured (set search.api-endpoint and \
                         search.api-key); the 'api' backend will yield no results"
                    );
                }
                None
            }
        }
    }
}

#[async_trait]
impl SearchBackend for ApiSearch {
    fn name(&self) -> &'static str {
        "api"
    }

    async fn discover(&self, query: &str, limit: usize) -> Vec<Candidate> {
        let (endpoint, key) = match self.configuration() {
            Some(c) => c,
            None => return Vec::new(),
        };

        self.politeness.delay_search().await;

        let query = with_filetype_qualifier(query);

        let mut request_url = match Url::parse(endpoint) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!("Invalid API endpoint {}: {}", endpoint, e);
                return Vec::new();
            }
        };
        request_url
            .query_pairs_mut()
            .append_pair("q", &query)
            .append_pair("num", &limit.to_string())
            .append_pair("key", key);

        let response = self
            .client
            .get(request_url)
            .header(USER_AGENT, self.politeness.pick_user_agent())
            .send()
            .await;

        let parsed: SearchResponse = match response {
            Ok(r) if r.status().is_success() => match r.json().await {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!("Error parsing API search response: {}", e);
                    return Vec::new();
                }
            },
            Ok(r) => {
                tracing::warn!("API search returned HTTP {}", r.status());
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Error during API search: {}", e);
                return Vec::new();
            }
        };

        let mut results = Vec::new();
        for item in parsed.items {
            let url = match normalize_candidate(&item.link) {
                Ok(u) => u,
                Err(_) => continue,
            };

            if !is_document_url(&url) {
                continue;
            }

            results.push(Candidate {
                url,
                backend: self.name(),
            });
            if results.len() >= limit {
                break;
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn unconfigured_backend() -> ApiSearch {
        let config = Config::default();
        ApiSearch::new(
            &config.crawler,
            &config.search,
            Arc::new(Politeness::none()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_unconfigured_backend_yields_empty() {
        let backend = unconfigured_backend();
        let results = backend.discover("machine learning", 10).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_condition_reported_once() {
        let backend = unconfigured_backend();

        assert!(!backend.unconfigured_reported.load(Ordering::Relaxed));
        backend.discover("first", 10).await;
        assert!(backend.unconfigured_reported.load(Ordering::Relaxed));

        // Latch stays set; further calls return empty without re-reporting
        backend.discover("second", 10).await;
        assert!(backend.unconfigured_reported.load(Ordering::Relaxed));
    }

    #[test]
    fn test_response_shape_parses() {
        let json = r#"{"items": [{"link": "https://a.example/x.pdf"}, {"link": "https://a.example/y.html"}]}"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.items.len(), 2);
    }

    #[test]
    fn test_response_without_items_parses_empty() {
        let parsed: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.items.is_empty());
    }
}

//! Site-crawl backend: the crawler behind the search contract
//!
//! Lets the pipeline treat "crawl this site" exactly like any other source:
//! the query string is reinterpreted as the seed URL.

use crate::config::CrawlerConfig;
use crate::crawler::SiteCrawler;
use crate::politeness::Politeness;
use crate::search::{Candidate, SearchBackend};
use crate::url::normalize_candidate;
use async_trait::async_trait;
use std::sync::Arc;

/// Backend that crawls a single site for document links
pub struct SiteCrawlBackend {
    crawler: SiteCrawler,
}

impl SiteCrawlBackend {
    pub fn new(
        config: CrawlerConfig,
        politeness: Arc<Politeness>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            crawler: SiteCrawler::new(config, politeness)?,
        })
    }
}

#[async_trait]
impl SearchBackend for SiteCrawlBackend {
    fn name(&self) -> &'static str {
        "website"
    }

    async fn discover(&self, query: &str, limit: usize) -> Vec<Candidate> {
        let seed = match normalize_candidate(query) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!("'{}' is not a crawlable seed URL: {}", query, e);
                return Vec::new();
            }
        };

        self.crawler
            .collect_documents(&seed, limit)
            .await
            .into_iter()
            .map(|url| Candidate {
                url,
                backend: self.name(),
            })
            .collect()
    }
}

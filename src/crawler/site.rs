//! Bounded breadth-first site crawl
//!
//! Walks a single registrable domain from a seed URL, collecting links whose
//! paths carry a document extension. The crawler never persists anything; it
//! only yields candidate URLs for the validator.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{build_http_client, fetch_page, PageFetch};
use crate::crawler::frontier::{Frontier, PushOutcome};
use crate::crawler::parser::extract_links;
use crate::politeness::Politeness;
use crate::url::{extract_host, is_document_url, same_site};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// Breadth-first crawler scoped to one registrable domain
pub struct SiteCrawler {
    client: Client,
    politeness: Arc<Politeness>,
    config: CrawlerConfig,
}

impl SiteCrawler {
    /// Creates a crawler with its own HTTP client
    pub fn new(
        config: CrawlerConfig,
        politeness: Arc<Politeness>,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config.request_timeout_secs)?;
        Ok(Self {
            client,
            politeness,
            config,
        })
    }

    /// Crawls from the seed, returning up to `limit` document candidates
    ///
    /// # Traversal
    ///
    /// The frontier is a bounded FIFO, so shallow pages are explored before
    /// deep ones. Pages that fail to fetch, return non-200, or are not HTML
    /// are skipped without expansion. Links are classified by extension only
    /// at this stage; the validator does the content sniffing later.
    ///
    /// # Termination
    ///
    /// Returns when the frontier drains, `limit` candidates are collected,
    /// or the visited-page safety ceiling is reached; always a bounded
    /// number of fetches.
    pub async fn collect_documents(&self, seed: &Url, limit: usize) -> Vec<Url> {
        let seed_host = match extract_host(seed) {
            Some(h) => h,
            None => {
                tracing::warn!("Seed URL {} has no host, nothing to crawl", seed);
                return Vec::new();
            }
        };

        let mut frontier = Frontier::new(self.config.max_pending_urls);
        frontier.push(seed.clone());

        let mut results: Vec<Url> = Vec::new();
        let mut seen_documents: HashSet<String> = HashSet::new();

        while results.len() < limit {
            let page = match frontier.pop() {
                Some(p) => p,
                None => break,
            };

            if frontier.is_visited(&page) {
                continue;
            }

            if frontier.visited_count() >= self.config.max_visited_pages {
                tracing::debug!(
                    "Visited-page ceiling ({}) reached for {}",
                    self.config.max_visited_pages,
                    seed_host
                );
                break;
            }

            frontier.mark_visited(&page);

            let user_agent = self.politeness.pick_user_agent().to_string();
            let fetched = fetch_page(&self.client, &page, &user_agent).await;

            // One politeness pause per page fetch
            self.politeness.delay_search().await;

            let (final_url, body) = match fetched {
                PageFetch::Html { final_url, body } => (final_url, body),
                PageFetch::ContentMismatch { content_type } => {
                    tracing::debug!("Skipping non-HTML page {} ({})", page, content_type);
                    continue;
                }
                PageFetch::HttpError { status_code } => {
                    tracing::debug!("Skipping {} (HTTP {})", page, status_code);
                    continue;
                }
                PageFetch::NetworkError { error } => {
                    tracing::warn!("Error crawling {}: {}", page, error);
                    continue;
                }
            };

            for link in extract_links(&body, &final_url) {
                let link_host = match extract_host(&link) {
                    Some(h) => h,
                    None => continue,
                };

                // Everything off-site is ignored, candidates included
                if !same_site(&link_host, &seed_host) {
                    continue;
                }

                if is_document_url(&link) {
                    if seen_documents.insert(link.as_str().to_string()) {
                        results.push(link);
                        if results.len() >= limit {
                            break;
                        }
                    }
                } else {
                    match frontier.push(link) {
                        PushOutcome::Queued | PushOutcome::AlreadySeen => {}
                        PushOutcome::AtCapacity => {
                            tracing::trace!("Frontier at capacity, dropping expansion link");
                        }
                    }
                }
            }
        }

        tracing::debug!(
            "Crawl of {} finished: {} candidates, {} pages visited, {} still pending",
            seed_host,
            results.len(),
            frontier.visited_count(),
            frontier.pending_count()
        );

        results
    }
}

//! Search backends: polymorphic sources of candidate URLs
//!
//! Every source of candidates, search engines and the site crawler alike,
//! implements [`SearchBackend`], so the pipeline fans out over any mix of
//! them with identical dedup and validation handling. Adding a source is an
//! extension, not a modification.

mod api;
mod duckduckgo;
mod site;

pub use api::ApiSearch;
pub use duckduckgo::DuckDuckGoSearch;
pub use site::SiteCrawlBackend;

use crate::config::Config;
use crate::politeness::Politeness;
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// A URL produced by a backend, not yet validated
#[derive(Debug, Clone)]
pub struct Candidate {
    pub url: Url,

    /// Name of the backend that produced the URL
    pub backend: &'static str,
}

/// A source of candidate document URLs
///
/// Implementations must degrade network and parse failures to an empty
/// result list; the pipeline logs and continues, it never aborts a run over
/// one backend.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Short name used for provenance tags and backend selection
    fn name(&self) -> &'static str;

    /// Produces up to `limit` candidate URLs for the query
    ///
    /// For the site-crawl backend the query is reinterpreted as the seed URL.
    async fn discover(&self, query: &str, limit: usize) -> Vec<Candidate>;
}

/// Resolves backend names to instances
///
/// Recognized names: `duckduckgo`, `api`, `website`. Unknown names are
/// logged and skipped rather than failing the run.
pub fn build_backends(
    names: &[String],
    config: &Config,
    politeness: Arc<Politeness>,
) -> crate::Result<Vec<Box<dyn SearchBackend>>> {
    let mut backends: Vec<Box<dyn SearchBackend>> = Vec::new();

    for name in names {
        match name.trim().to_lowercase().as_str() {
            "duckduckgo" => backends.push(Box::new(DuckDuckGoSearch::new(
                &config.crawler,
                Arc::clone(&politeness),
            )?)),
            "api" => backends.push(Box::new(ApiSearch::new(
                &config.crawler,
                &config.search,
                Arc::clone(&politeness),
            )?)),
            "website" => backends.push(Box::new(SiteCrawlBackend::new(
                config.crawler.clone(),
                Arc::clone(&politeness),
            )?)),
            other => {
                tracing::warn!("Unknown search backend '{}', skipping", other);
            }
        }
    }

    Ok(backends)
}

/// Fans the query out across backends, concatenating results in order
pub async fn discover_all(
    backends: &[Box<dyn SearchBackend>],
    query: &str,
    limit: usize,
) -> Vec<Candidate> {
    let mut all = Vec::new();

    for backend in backends {
        tracing::info!("Discovering via {}: {}", backend.name(), query);
        let found = backend.discover(query, limit).await;
        tracing::info!("{} produced {} candidates", backend.name(), found.len());
        all.extend(found);
    }

    all
}

/// Appends the document filetype qualifier unless the query already has one
pub(crate) fn with_filetype_qualifier(query: &str) -> String {
    if query.to_lowercase().contains("filetype:pdf") {
        query.to_string()
    } else {
        format!("{} filetype:pdf", query)
    }
}

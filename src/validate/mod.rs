//! URL validation and metadata extraction
//!
//! Confirms that a candidate URL really is a PDF, filters it by declared
//! size, and pulls title/author/page-count/year metadata out of a bounded
//! prefix of the body. Every failure is a tagged verdict, never a panic or
//! a propagated error: one bad candidate must not end the run.

mod metadata;

pub use metadata::{extract_metadata, ExtractionError, SniffedMetadata};

use crate::config::ValidatorConfig;
use crate::crawler::build_http_client;
use crate::politeness::Politeness;
use crate::url::{file_name, is_document_url};
use futures_util::StreamExt;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Metadata captured while validating a candidate
///
/// Fields fill in step by step; whatever was captured before a rejection is
/// preserved in the verdict.
#[derive(Debug, Clone, Default)]
pub struct DocMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year_published: Option<u16>,
    pub pages: Option<u32>,
    pub size_mb: Option<f64>,
}

/// Why a candidate was rejected
#[derive(Debug, Clone)]
pub enum RejectReason {
    /// Content type is not a document and the extension does not match
    ContentMismatch { content_type: String },

    /// Declared size exceeds the configured ceiling
    Oversized { size_mb: f64 },

    /// Timeout, connection failure, or non-success status
    Network { error: String },
}

/// Outcome of validating one candidate URL
#[derive(Debug, Clone)]
pub enum Verdict {
    /// The URL is a genuine document; metadata as extracted
    Accepted(DocMetadata),

    /// The URL was rejected; metadata captured up to the deciding step
    Rejected {
        reason: RejectReason,
        metadata: DocMetadata,
    },
}

impl Verdict {
    /// Returns true for accepted candidates
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }

    /// The metadata captured during validation, accepted or not
    pub fn metadata(&self) -> &DocMetadata {
        match self {
            Verdict::Accepted(m) => m,
            Verdict::Rejected { metadata, .. } => metadata,
        }
    }
}

/// Internal classification of deep-verification failures
enum SniffError {
    /// The partial download itself failed
    Network(String),

    /// The downloaded prefix could not be parsed
    Extraction(ExtractionError),
}

/// Validates candidate URLs and extracts their metadata
pub struct Validator {
    client: Client,
    politeness: Arc<Politeness>,
    config: ValidatorConfig,
}

impl Validator {
    /// Creates a validator with its own HTTP client
    pub fn new(
        config: ValidatorConfig,
        politeness: Arc<Politeness>,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config.download_timeout_secs)?;
        Ok(Self {
            client,
            politeness,
            config,
        })
    }

    /// Validates one candidate URL
    ///
    /// # Steps
    ///
    /// 1. HEAD request: reject on network failure, non-success status, or a
    ///    content type that is not a document when the extension does not
    ///    match either.
    /// 2. Size filter from `Content-Length`, when declared.
    /// 3. Fallback title derived from the URL's file name.
    /// 4. With `deep`, bounded-prefix download and metadata sniff; a parse
    ///    failure keeps the fallback title and omits the page count.
    /// 5. Title normalization (whitespace collapse, 200-char cap).
    ///
    /// No retries: a single failure ends validation for this URL.
    pub async fn validate(&self, url: &Url, deep: bool) -> Verdict {
        let mut captured = DocMetadata::default();
        let user_agent = self.politeness.pick_user_agent().to_string();

        // Step 1: header-only request
        let head = self
            .client
            .head(url.clone())
            .header(USER_AGENT, &user_agent)
            .timeout(Duration::from_secs(self.config.head_timeout_secs))
            .send()
            .await;

        let response = match head {
            Ok(r) => r,
            Err(e) => {
                return Verdict::Rejected {
                    reason: RejectReason::Network {
                        error: e.to_string(),
                    },
                    metadata: captured,
                }
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Verdict::Rejected {
                reason: RejectReason::Network {
                    error: format!("HTTP {}", status.as_u16()),
                },
                metadata: captured,
            };
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        if !content_type.contains("application/pdf") && !is_document_url(url) {
            tracing::debug!("Skipping non-PDF content type '{}' for {}", content_type, url);
            return Verdict::Rejected {
                reason: RejectReason::ContentMismatch { content_type },
                metadata: captured,
            };
        }

        // Step 2: size filter
        if let Some(length) = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
        {
            let size_mb = round2(length as f64 / (1024.0 * 1024.0));
            captured.size_mb = Some(size_mb);

            if size_mb > self.config.max_size_mb {
                tracing::debug!("Skipping large PDF ({} MB): {}", size_mb, url);
                return Verdict::Rejected {
                    reason: RejectReason::Oversized { size_mb },
                    metadata: captured,
                };
            }
        }

        // Step 3: fallback title from the URL
        captured.title = title_from_url(url);

        // Step 4: partial-download metadata sniff
        if deep {
            match self.sniff(url, &user_agent).await {
                Ok(sniffed) => {
                    if sniffed.title.is_some() {
                        captured.title = sniffed.title;
                    }
                    captured.author = sniffed.author;
                    captured.year_published = sniffed.year_published;
                    captured.pages = sniffed.pages;
                }
                Err(SniffError::Network(error)) => {
                    return Verdict::Rejected {
                        reason: RejectReason::Network { error },
                        metadata: captured,
                    }
                }
                Err(SniffError::Extraction(e)) => {
                    // Expected on truncated prefixes: keep the fallback title
                    tracing::debug!("Metadata extraction failed for {}: {}", url, e);
                }
            }
        }

        // Step 5: final title normalization
        captured.title = captured
            .title
            .map(|t| normalize_title(&t))
            .filter(|t| !t.is_empty());

        Verdict::Accepted(captured)
    }

    /// Streams a bounded prefix of the body to a scratch file and sniffs it
    ///
    /// The scratch file is a `NamedTempFile`, removed on drop; success,
    /// parse error, and early return all clean up the same way.
    async fn sniff(&self, url: &Url, user_agent: &str) -> Result<SniffedMetadata, SniffError> {
        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, user_agent)
            .send()
            .await
            .map_err(|e| SniffError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SniffError::Network(format!("HTTP {}", status.as_u16())));
        }

        let limit = self.config.sniff_prefix_bytes;
        let mut buffer: Vec<u8> = Vec::with_capacity(limit.min(64 * 1024));
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| SniffError::Network(e.to_string()))?;
            buffer.extend_from_slice(&chunk);
            if buffer.len() >= limit {
                buffer.truncate(limit);
                break;
            }
        }

        let mut scratch = tempfile::NamedTempFile::new()
            .map_err(|e| SniffError::Extraction(ExtractionError::from(e)))?;
        scratch
            .write_all(&buffer)
            .and_then(|_| scratch.flush())
            .map_err(|e| SniffError::Extraction(ExtractionError::from(e)))?;

        extract_metadata(scratch.path()).map_err(SniffError::Extraction)
    }
}

/// Rounds to two decimal places (size reporting)
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derives a readable title from the URL's final path segment
///
/// Strips the extension, de-slugs separators into spaces, and capitalizes
/// words that were entirely lower-case. Mixed-case words are left alone;
/// they usually carry meaning (acronyms, camel-case names).
pub fn title_from_url(url: &Url) -> Option<String> {
    let name = file_name(url)?;

    let stem = match name.rfind('.') {
        Some(pos) if pos > 0 => &name[..pos],
        _ => name.as_str(),
    };

    let cleaned = stem.replace(['-', '_'], " ");
    let title = cleaned
        .split_whitespace()
        .map(|word| {
            let has_letters = word.chars().any(|c| c.is_alphabetic());
            let all_lower = !word.chars().any(|c| c.is_uppercase());
            if has_letters && all_lower {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Collapses whitespace runs and caps the title at 200 characters
pub fn normalize_title(title: &str) -> String {
    let collapsed = title.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() > 200 {
        let truncated: String = collapsed.chars().take(197).collect();
        format!("{}...", truncated)
    } else {
        collapsed
    }
}

//! HTTP fetcher for the site crawler
//!
//! Builds the shared HTTP client and performs page GETs with explicit,
//! tagged outcomes. Per-request user agents come from the politeness
//! controller, so the client itself carries no default identity.

use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of fetching one page
#[derive(Debug)]
pub enum PageFetch {
    /// Page returned 200 with an HTML content type
    Html {
        /// Final URL after redirects
        final_url: Url,
        /// Page body
        body: String,
    },

    /// Page is not HTML (Content-Type mismatch); not expanded further
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// Non-success HTTP status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Timeout, connection failure, or body read failure
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with the crawl timeout applied
///
/// Redirects follow reqwest's default policy; the final URL after redirects
/// is what link resolution uses as its base.
pub fn build_http_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page, classifying every failure instead of raising it
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `user_agent` - User agent string for this request
pub async fn fetch_page(client: &Client, url: &Url, user_agent: &str) -> PageFetch {
    let response = match client
        .get(url.clone())
        .header(USER_AGENT, user_agent)
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection failed".to_string()
            } else {
                e.to_string()
            };
            return PageFetch::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return PageFetch::HttpError {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        return PageFetch::ContentMismatch { content_type };
    }

    let final_url = response.url().clone();

    match response.text().await {
        Ok(body) => PageFetch::Html { final_url, body },
        Err(e) => PageFetch::NetworkError {
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(10);
        assert!(client.is_ok());
    }

    // Fetch behavior against live responses is covered by the wiremock
    // integration tests in tests/crawl_tests.rs.
}

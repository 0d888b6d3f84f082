use crate::UrlError;
use url::Url;

/// Parses a candidate URL and applies the pipeline's normalization rules
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject schemes other than HTTP(S)
/// 3. Reject URLs without a host
/// 4. Remove the fragment (same-document anchors never change the resource)
///
/// Candidates are otherwise kept byte-for-byte as discovered: the catalog's
/// `url` field is also the key the downstream viewer fetches, so rewriting
/// paths or query strings here would break dedup against existing entries.
pub fn normalize_candidate(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}

//! HTML link extraction for the site crawler
//!
//! Pulls candidate hyperlinks out of fetched pages. Relative hrefs are
//! resolved against the page URL; non-navigational schemes are dropped.
//! Anchors carrying a `download` attribute are kept deliberately: direct
//! document downloads are exactly what this crawler is hunting for.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all followable links from an HTML document
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page URL, used to resolve relative hrefs
///
/// # Returns
///
/// Absolute HTTP(S) URLs in document order, unfiltered for domain or
/// extension; classification is the crawl loop's job.
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(url) = resolve_link(href, base_url) {
                    links.push(url);
                }
            }
        }
    }

    links
}

/// Resolves an href to an absolute URL, dropping non-navigational links
///
/// Returns None for:
/// - javascript:, mailto:, tel: schemes and data: URIs
/// - fragment-only links (same-page anchors)
/// - hrefs that fail to resolve
/// - non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(mut absolute) => {
            if absolute.scheme() == "http" || absolute.scheme() == "https" {
                // Same-document anchors never change the resource
                absolute.set_fragment(None);
                Some(absolute)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

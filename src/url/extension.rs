use url::Url;

/// Path extensions recognized as downloadable documents
///
/// Matching is by extension only; content sniffing belongs to the validator.
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];

/// Returns true when the URL path ends in a recognized document extension
///
/// The check is case-insensitive and ignores query strings and fragments,
/// so `https://a.example/X.PDF?dl=1` is a document candidate.
pub fn is_document_url(url: &Url) -> bool {
    has_document_extension(url.path())
}

/// Returns true when a path string ends in a recognized document extension
pub fn has_document_extension(path: &str) -> bool {
    let lower = path.to_lowercase();
    DOCUMENT_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// Returns the final path segment of a URL, percent-decoded
///
/// Used to derive a fallback title for documents with no embedded metadata.
pub fn file_name(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    Some(urlencoding::decode(segment).map_or_else(|_| segment.to_string(), |s| s.into_owned()))
}

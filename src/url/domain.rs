use url::{Host, Url};

/// Extracts the host from a URL
///
/// Returns the lowercase host portion, or None when the URL has no host
/// (which should not happen for valid HTTP(S) URLs).
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Computes the registrable portion of a host name
///
/// DNS names keep their last two labels ("docs.example.com" -> "example.com");
/// IP addresses and single-label hosts are returned unchanged. This is a
/// suffix-list-free approximation, which slightly over-scopes hosts under
/// multi-label public suffixes.
pub fn registrable_domain(host: &str) -> String {
    let host = host.to_lowercase();

    // IP literals have no registrable structure
    if Host::parse(&host)
        .map(|h| !matches!(h, Host::Domain(_)))
        .unwrap_or(false)
    {
        return host;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() <= 2 {
        return host;
    }

    labels[labels.len() - 2..].join(".")
}

/// Returns true when two hosts share a registrable domain
pub fn same_site(a: &str, b: &str) -> bool {
    registrable_domain(a) == registrable_domain(b)
}

//! Integration tests for the site crawler
//!
//! These use wiremock servers to exercise the full crawl cycle: candidate
//! collection, domain scoping, bounded traversal, and termination.

use pdfscout::config::CrawlerConfig;
use pdfscout::crawler::SiteCrawler;
use pdfscout::politeness::Politeness;
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> CrawlerConfig {
    CrawlerConfig {
        max_pending_urls: 50,
        max_visited_pages: 200,
        request_timeout_secs: 5,
    }
}

fn crawler(config: CrawlerConfig) -> SiteCrawler {
    SiteCrawler::new(config, Arc::new(Politeness::none())).unwrap()
}

async fn mount_html(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            // set_body_raw pins the Content-Type; set_body_string would let
            // wiremock overwrite it with text/plain at response-generation time.
            ResponseTemplate::new(200).set_body_raw(body, "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_seed_page_yields_single_candidate() {
    // The canonical scoping case: one same-site document link, one HTML
    // link, one cross-domain document link.
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        r#"<html><body>
            <a href="/a.pdf">Paper</a>
            <a href="/b.html">Page</a>
            <a href="https://other.example/c.pdf">Elsewhere</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_html(&server, "/b.html", "<html><body>nothing here</body></html>".to_string()).await;

    let seed = Url::parse(&format!("{}/", base)).unwrap();
    let candidates = crawler(test_config()).collect_documents(&seed, 10).await;

    let urls: Vec<String> = candidates.iter().map(|u| u.to_string()).collect();
    assert_eq!(urls, vec![format!("{}/a.pdf", base)]);
}

#[tokio::test]
async fn test_relative_links_resolved_against_page() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        r#"<html><body><a href="/docs/">Docs</a></body></html>"#.to_string(),
    )
    .await;
    mount_html(
        &server,
        "/docs/",
        r#"<html><body><a href="guide.pdf">Guide</a></body></html>"#.to_string(),
    )
    .await;

    let seed = Url::parse(&format!("{}/", base)).unwrap();
    let candidates = crawler(test_config()).collect_documents(&seed, 10).await;

    let urls: Vec<String> = candidates.iter().map(|u| u.to_string()).collect();
    assert_eq!(urls, vec![format!("{}/docs/guide.pdf", base)]);
}

#[tokio::test]
async fn test_limit_stops_collection() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        r#"<html><body>
            <a href="/1.pdf">1</a>
            <a href="/2.pdf">2</a>
            <a href="/3.pdf">3</a>
        </body></html>"#
            .to_string(),
    )
    .await;

    let seed = Url::parse(&format!("{}/", base)).unwrap();
    let candidates = crawler(test_config()).collect_documents(&seed, 2).await;

    assert_eq!(candidates.len(), 2);
}

#[tokio::test]
async fn test_duplicate_document_links_deduplicated() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        r#"<html><body>
            <a href="/a.pdf">First mention</a>
            <a href="/a.pdf">Second mention</a>
        </body></html>"#
            .to_string(),
    )
    .await;

    let seed = Url::parse(&format!("{}/", base)).unwrap();
    let candidates = crawler(test_config()).collect_documents(&seed, 10).await;

    assert_eq!(candidates.len(), 1);
}

#[tokio::test]
async fn test_crawl_terminates_on_link_cycle() {
    // /, /p1, /p2 all link to each other; without the visited set this
    // would never drain.
    let server = MockServer::start().await;
    let base = server.uri();

    let links = r#"<a href="/">home</a><a href="/p1">1</a><a href="/p2">2</a>"#;
    mount_html(&server, "/", format!("<html><body>{}</body></html>", links)).await;
    mount_html(&server, "/p1", format!("<html><body>{}</body></html>", links)).await;
    mount_html(&server, "/p2", format!("<html><body>{}</body></html>", links)).await;

    let seed = Url::parse(&format!("{}/", base)).unwrap();
    let candidates = crawler(test_config()).collect_documents(&seed, 10).await;

    assert!(candidates.is_empty());
}

#[tokio::test]
async fn test_visited_ceiling_bounds_fetches() {
    // A chain deeper than the ceiling; the page beyond it is never fetched.
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        r#"<html><body><a href="/l1">next</a></body></html>"#.to_string(),
    )
    .await;
    mount_html(
        &server,
        "/l1",
        r#"<html><body><a href="/l2">next</a></body></html>"#.to_string(),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/l2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>too deep</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .expect(0)
        .mount(&server)
        .await;

    let mut config = test_config();
    config.max_visited_pages = 2;

    let seed = Url::parse(&format!("{}/", base)).unwrap();
    let candidates = crawler(config).collect_documents(&seed, 10).await;

    assert!(candidates.is_empty());
}

#[tokio::test]
async fn test_frontier_capacity_bounds_queue() {
    // 30 expansion links against a capacity of 3: the crawl completes and
    // only ever holds a bounded number of pending URLs.
    let server = MockServer::start().await;
    let base = server.uri();

    let many_links: String = (0..30)
        .map(|i| format!(r#"<a href="/page{}">p{}</a>"#, i, i))
        .collect();
    mount_html(&server, "/", format!("<html><body>{}</body></html>", many_links)).await;

    for i in 0..30 {
        mount_html(
            &server,
            &format!("/page{}", i),
            "<html><body>leaf</body></html>".to_string(),
        )
        .await;
    }

    let mut config = test_config();
    config.max_pending_urls = 3;

    let seed = Url::parse(&format!("{}/", base)).unwrap();
    let candidates = crawler(config).collect_documents(&seed, 10).await;

    assert!(candidates.is_empty());
}

#[tokio::test]
async fn test_non_html_seed_not_expanded() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"not": "html"}"#)
                .insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;

    let seed = Url::parse(&format!("{}/", base)).unwrap();
    let candidates = crawler(test_config()).collect_documents(&seed, 10).await;

    assert!(candidates.is_empty());
}

#[tokio::test]
async fn test_error_page_skipped() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let seed = Url::parse(&format!("{}/", base)).unwrap();
    let candidates = crawler(test_config()).collect_documents(&seed, 10).await;

    assert!(candidates.is_empty());
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty() {
    // Nothing is listening on this port; the crawl degrades to no results.
    let mut config = test_config();
    config.request_timeout_secs = 1;

    let seed = Url::parse("http://127.0.0.1:9/").unwrap();
    let candidates = crawler(config).collect_documents(&seed, 10).await;

    assert!(candidates.is_empty());
}

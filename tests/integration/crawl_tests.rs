//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run full crawls
//! through the HTTP fetcher, plus one config-driven crawl over a fixture.

use ripple_crawl::config::{load_config, Config};
use ripple_crawl::crawler::{crawl_with_config, Coordinator, HttpFetcher};
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html_page(title: &str, links: &[String]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|link| format!(r#"<a href="{}">{}</a>"#, link, link))
        .collect();

    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, anchors
        ))
        .insert_header("content-type", "text/html")
}

/// Mounts a page that must be requested exactly `times` times
async fn mount_page(server: &MockServer, route: &str, title: &str, links: &[String], times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(title, links))
        .expect(times)
        .mount(server)
        .await;
}

fn test_fetcher() -> HttpFetcher {
    HttpFetcher::from_config(&Config::default()).expect("Failed to build HTTP fetcher")
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        "Home",
        &[format!("{}/page1", base_url), "/page2".to_string()],
        1,
    )
    .await;
    mount_page(&mock_server, "/page1", "Page 1", &["/".to_string()], 1).await;
    mount_page(&mock_server, "/page2", "Page 2", &[], 1).await;

    let seed = format!("{}/", base_url);
    let report = Coordinator::new(test_fetcher())
        .run(&seed, 3)
        .await
        .expect("Crawl failed");

    let mut found: Vec<_> = report.found().collect();
    found.sort_unstable();
    assert_eq!(
        found,
        vec![
            seed.as_str(),
            format!("{}/page1", base_url).as_str(),
            format!("{}/page2", base_url).as_str(),
        ]
    );
    assert_eq!(report.cached().collect::<Vec<_>>(), vec![seed.as_str()]);
    assert_eq!(report.errors().count(), 0);

    // Wiremock verifies every page was requested exactly once on drop
}

#[tokio::test]
async fn test_http_error_is_reported_not_fatal() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        "Home",
        &["/missing".to_string(), "/ok".to_string()],
        1,
    )
    .await;
    mount_page(&mock_server, "/ok", "Ok", &[], 1).await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = Coordinator::new(test_fetcher())
        .run(&format!("{}/", base_url), 3)
        .await
        .expect("Crawl failed");

    assert_eq!(report.found().count(), 2);

    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, format!("{}/missing", base_url));
    assert!(errors[0].1.description().contains("HTTP 404"));
}

#[tokio::test]
async fn test_crawl_with_depth_limit() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Chain: / -> level1 -> level2 -> level3
    mount_page(&mock_server, "/", "Home", &["/level1".to_string()], 1).await;
    mount_page(&mock_server, "/level1", "Level 1", &["/level2".to_string()], 1).await;
    mount_page(&mock_server, "/level2", "Level 2", &["/level3".to_string()], 0).await;
    mount_page(&mock_server, "/level3", "Level 3", &[], 0).await;

    let report = Coordinator::new(test_fetcher())
        .run(&format!("{}/", base_url), 2)
        .await
        .expect("Crawl failed");

    assert_eq!(report.found().count(), 2);
    assert_eq!(report.statistics().deepest_level, Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_page_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let hubs: Vec<String> = (0..6).map(|i| format!("/hub{}", i)).collect();
    mount_page(&mock_server, "/", "Home", &hubs, 1).await;
    for hub in &hubs {
        mount_page(
            &mock_server,
            hub,
            "Hub",
            &["/shared".to_string(), "/shared#top".to_string(), "/".to_string()],
            1,
        )
        .await;
    }
    mount_page(&mock_server, "/shared", "Shared", &[], 1).await;

    let report = Coordinator::new(test_fetcher())
        .with_channel_capacity(8)
        .run(&format!("{}/", base_url), 4)
        .await
        .expect("Crawl failed");

    assert_eq!(report.found().count(), hubs.len() + 2);
    assert_eq!(report.errors().count(), 0);
    // Six hubs each link /shared twice and / once; only one /shared link wins.
    assert_eq!(report.cached().count(), hubs.len() * 3 - 1);
}

#[tokio::test]
async fn test_config_driven_fixture_crawl() {
    let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/golang.toml");
    let config_content = format!(
        r#"
[crawler]
seed = "https://golang.org/"
max-depth = 4
channel-capacity = 2

[fetcher]
kind = "static"
fixture-path = "{}"
"#,
        fixture
    );

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config_content.as_bytes()).unwrap();
    file.flush().unwrap();

    let config = load_config(file.path()).expect("Failed to load config");

    let mut lines = Vec::new();
    let report = crawl_with_config(&config, |outcome| lines.push(outcome.to_string()))
        .await
        .expect("Crawl failed");

    let stats = report.statistics();
    assert_eq!(stats.found, 4);
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.cached, 6);
    assert_eq!(lines.len(), 11);
    assert!(lines.contains(&"url: https://golang.org/ already cached".to_string()));
}

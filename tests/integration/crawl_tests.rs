//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end through the real HTTP transport.

use product_scout::config::{load_config, CrawlerConfig};
use product_scout::crawler::{crawl_domain, CrawlBudget, HttpFetcher, Transport};
use product_scout::output::ResultsFile;
use product_scout::strategy::StrategyRegistry;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::{NamedTempFile, TempDir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport() -> Arc<dyn Transport> {
    let config = CrawlerConfig {
        request_timeout_secs: 5,
        ..CrawlerConfig::default()
    };
    Arc::new(HttpFetcher::new(&config).expect("Failed to build HTTP client"))
}

fn budget(max_urls: usize) -> CrawlBudget {
    CrawlBudget::new(max_urls, 3, Duration::ZERO)
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Home</title></head><body>
        <a href="/p/123">Kurta</a>
        <a href="/about">About us</a>
        <a href="/theme.css">Theme</a>
        <a href="https://elsewhere.example/p/1">Partner</a>
        <a href="/about#team">Team</a>
        </body></html>"#,
    )
    .await;

    mount_page(
        &mock_server,
        "/p/123",
        r#"<html><body><h1>Kurta</h1><button>Add to Cart</button>
        <a href="/">Home</a><a href="/p/123/">Self</a></body></html>"#,
    )
    .await;

    mount_page(
        &mock_server,
        "/about",
        "<html><body><p>We make clothes.</p></body></html>",
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/theme.css"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let root = format!("{}/", base_url);
    let registry = StrategyRegistry::with_builtin_sites().unwrap();
    let report = crawl_domain(&root, &registry, transport(), budget(100))
        .await
        .expect("Crawl failed");

    assert_eq!(report.product_urls, vec![format!("{}/p/123", base_url)]);
    assert_eq!(report.visited, 3);
    assert_eq!(report.domain, root);
}

#[tokio::test]
async fn test_http_errors_do_not_abort_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/gone">Gone</a><a href="/shop/dress-1">Dress</a><a href="/boom">Boom</a>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/boom"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/shop/dress-1", "<html><body>Dress</body></html>").await;

    let registry = StrategyRegistry::new();
    let report = crawl_domain(&format!("{}/", base_url), &registry, transport(), budget(100))
        .await
        .expect("Crawl failed");

    assert_eq!(report.product_urls, vec![format!("{}/shop/dress-1", base_url)]);
    assert_eq!(report.visited, 4);
}

#[tokio::test]
async fn test_budget_limits_requests() {
    let mock_server = MockServer::start().await;

    let links: String = (0..20)
        .map(|i| format!(r#"<a href="/c/{}">Category {}</a>"#, i, i))
        .collect();
    let body = format!("<html><body>{}</body></html>", links);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let registry = StrategyRegistry::new();
    let report = crawl_domain(
        &format!("{}/", mock_server.uri()),
        &registry,
        transport(),
        budget(5),
    )
    .await
    .expect("Crawl failed");

    assert_eq!(report.visited, 5);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 5);
}

#[tokio::test]
async fn test_site_profile_from_config() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let mut config_file = NamedTempFile::new().unwrap();
    write!(
        config_file,
        r#"
[crawler]
max-urls = 50
concurrency = 2

[[site]]
domain = "127.0.0.1"
name = "local-shop"
product-url-patterns = ['/item-\d+$']
excluded-paths = ["/account"]
"#
    )
    .unwrap();
    let config = load_config(config_file.path()).expect("Failed to load config");

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/item-7">Item</a><a href="/account/orders">Orders</a><a href="/new">New</a>"#,
    )
    .await;
    mount_page(&mock_server, "/item-7", "<html><body>Blue shirt</body></html>").await;
    mount_page(&mock_server, "/new", "<html><body>New arrivals</body></html>").await;

    Mock::given(method("GET"))
        .and(path("/account/orders"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut registry = StrategyRegistry::with_builtin_sites().unwrap();
    for profile in config.site {
        registry.register(profile).unwrap();
    }

    let root = format!("{}/", base_url);
    assert_eq!(registry.resolve(&root).unwrap().name(), "local-shop");

    let report = crawl_domain(
        &root,
        &registry,
        transport(),
        CrawlBudget::from_config(&CrawlerConfig {
            pacing_delay_ms: 0,
            ..config.crawler
        }),
    )
    .await
    .expect("Crawl failed");

    assert_eq!(report.product_urls, vec![format!("{}/item-7", base_url)]);
}

#[tokio::test]
async fn test_results_saved_and_merged() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/product/linen-shirt">Shirt</a>"#,
    )
    .await;
    mount_page(&mock_server, "/product/linen-shirt", "<html></html>").await;

    let root = format!("{}/", base_url);
    let report = crawl_domain(&root, &StrategyRegistry::new(), transport(), budget(10))
        .await
        .expect("Crawl failed");

    let dir = TempDir::new().unwrap();
    let results_path = dir.path().join("output/product_urls.json");
    std::fs::create_dir_all(results_path.parent().unwrap()).unwrap();
    std::fs::write(
        &results_path,
        r#"{"metadata": {}, "https://old.example/": ["https://old.example/p/1"]}"#,
    )
    .unwrap();

    let mut results = ResultsFile::load_or_default(&results_path);
    results.begin_run(1, None, chrono::Utc::now());
    results.record_domain(&report, chrono::Utc::now());
    results.finish(chrono::Utc::now());
    results.save(&results_path).unwrap();

    let saved = ResultsFile::load_or_default(&results_path);
    assert_eq!(
        saved.domains[&root],
        vec![format!("{}/product/linen-shirt", base_url)]
    );
    assert!(saved.domains.contains_key("https://old.example/"));
    assert_eq!(saved.metadata.total_products, Some(2));
    assert_eq!(saved.domain_metadata[&root].product_count, 1);
}

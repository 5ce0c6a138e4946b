//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Transport` trait
//! - HTML parsing and anchor link extraction
//! - The deduplicating URL frontier
//! - The per-domain crawl engine and its worker pool

mod engine;
mod fetcher;
mod frontier;
mod parser;

pub use engine::{CrawlBudget, CrawlEngine, CrawlReport};
pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpFetcher, Transport};
pub use frontier::UrlFrontier;
pub use parser::{extract_anchor_links, parse_document};

use crate::strategy::StrategyRegistry;
use crate::ScoutError;
use std::sync::Arc;

/// Crawls one domain root to completion
///
/// This is the main entry point for a single domain. It will:
/// 1. Resolve the site strategy for the root
/// 2. Seed the frontier with the root
/// 3. Run the worker pool until the budget is spent or no work is left
/// 4. Return the product URLs found
///
/// # Arguments
///
/// * `root` - The domain root, e.g. `https://www.westside.com/`
/// * `registry` - Site profiles to pick the strategy from
/// * `transport` - How pages are fetched
/// * `budget` - URL budget, worker count and pacing
pub async fn crawl_domain(
    root: &str,
    registry: &StrategyRegistry,
    transport: Arc<dyn Transport>,
    budget: CrawlBudget,
) -> Result<CrawlReport, ScoutError> {
    let strategy = registry.resolve(root)?;
    CrawlEngine::new(root, budget, strategy, transport).run().await
}

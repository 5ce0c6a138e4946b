//! Site strategies: per-site crawl and classification behavior
//!
//! A [`SiteStrategy`] decides which links a page yields, which of them are
//! worth crawling, and whether the page is a product page. The generic
//! behavior lives in the trait's default methods and in [`GenericStrategy`];
//! [`ProfiledStrategy`] layers a [`SiteProfile`] on top of it.
//!
//! Every override first applies the generic behavior and then either
//! restricts admission or broadens extraction and classification. An
//! override can never turn a generic product hit into a miss.

mod generic;
mod profile;
mod registry;
mod sites;

pub use generic::GenericStrategy;
pub use profile::{CardRule, CompiledProfile, ContentHeuristics, ProfiledStrategy, SiteProfile};
pub use registry::StrategyRegistry;
pub use sites::{builtin_profiles, DEFAULT_DOMAINS};

use crate::classifier::{ClassificationSignal, ProductClassifier};
use crate::crawler::{parse_document, FetchResult, Transport};
use async_trait::async_trait;
use scraper::Html;
use tracing::{debug, error, info, warn};
use url::Url;

/// What a worker learned from one fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    /// The URL that was requested
    pub url: String,

    /// Whether any generic or site signal marked the page as a product
    pub is_product: bool,

    /// The first signal that fired, if any
    pub signal: Option<ClassificationSignal>,

    /// Extracted links that passed `should_crawl`
    pub links: Vec<String>,
}

/// Per-site crawl behavior
///
/// Implementors share one instance across all workers of a run, so every
/// method takes `&self` and strategies hold only static configuration.
#[async_trait]
pub trait SiteStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// The domain root this strategy crawls
    fn root(&self) -> &Url;

    fn classifier(&self) -> &ProductClassifier;

    /// Extracts candidate links from a parsed page
    fn extract_links(&self, document: &Html, base_url: &Url) -> Vec<String>;

    /// Returns true if a discovered URL should be queued
    fn should_crawl(&self, url: &str) -> bool;

    /// Site-specific product signals, OR'd with the generic classifier
    fn extra_signals(&self, _url: &str, _raw_markup: &str, _document: &Html) -> bool {
        false
    }

    /// Classifies a fetched page and collects its crawlable links
    ///
    /// `base_url` is the final URL after redirects and is used to resolve
    /// relative links; `url` is the requested URL and is what gets
    /// classified and recorded.
    fn evaluate_page(&self, url: &str, base_url: &Url, body: &str) -> PageOutcome {
        let document = parse_document(body);

        let signal = self
            .classifier()
            .detect(url, body, &document)
            .or_else(|| {
                self.extra_signals(url, body, &document)
                    .then_some(ClassificationSignal::Site)
            });

        let links = self
            .extract_links(&document, base_url)
            .into_iter()
            .filter(|link| self.should_crawl(link))
            .collect();

        PageOutcome {
            url: url.to_string(),
            is_product: signal.is_some(),
            signal,
            links,
        }
    }

    /// Fetches a URL and evaluates it
    ///
    /// Returns None when there is no content to evaluate: a non-200 answer,
    /// a transport failure, or a URL that cannot be parsed.
    async fn fetch_and_classify(
        &self,
        url: &str,
        transport: &dyn Transport,
    ) -> Option<PageOutcome> {
        match transport.fetch(url).await {
            FetchResult::Success {
                final_url, body, ..
            } => {
                let base_url = match Url::parse(&final_url).or_else(|_| Url::parse(url)) {
                    Ok(base_url) => base_url,
                    Err(e) => {
                        error!(strategy = self.name(), url, error = %e, "Cannot parse page URL");
                        return None;
                    }
                };

                let outcome = self.evaluate_page(url, &base_url, &body);
                if let Some(signal) = outcome.signal {
                    info!(strategy = self.name(), url, %signal, "Product page found");
                }
                debug!(url, links = outcome.links.len(), "Page evaluated");
                Some(outcome)
            }
            FetchResult::HttpError { status_code } => {
                warn!(url, status_code, "Got non-success status");
                None
            }
            FetchResult::NetworkError { error } => {
                error!(url, %error, "Error processing URL");
                None
            }
        }
    }
}

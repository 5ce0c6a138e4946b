//! Crawl engine - per-domain crawl orchestration
//!
//! This module contains the worker pool that drives one crawl run:
//! - Seeding the frontier with the domain root
//! - Spawning a fixed number of workers that claim URLs under one lock
//! - Fetching and classifying pages through the site strategy
//! - Feeding admitted links back into the frontier
//! - Stopping on the URL budget or once no work is left anywhere

use crate::config::CrawlerConfig;
use crate::crawler::Transport;
use crate::state::{Claim, CrawlState};
use crate::strategy::{PageOutcome, SiteStrategy};
use crate::ScoutError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::Notify;

/// Limits fixed for one crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlBudget {
    /// Maximum number of distinct URLs visited
    pub max_urls: usize,

    /// Number of concurrent workers (at least one)
    pub concurrency: usize,

    /// Pause after each processed URL
    pub pacing_delay: Duration,
}

impl CrawlBudget {
    pub fn new(max_urls: usize, concurrency: usize, pacing_delay: Duration) -> Self {
        Self {
            max_urls,
            concurrency: concurrency.max(1),
            pacing_delay,
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(
            config.max_urls,
            config.concurrency,
            Duration::from_millis(config.pacing_delay_ms),
        )
    }
}

impl Default for CrawlBudget {
    fn default() -> Self {
        Self::from_config(&CrawlerConfig::default())
    }
}

/// Result of one completed crawl run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// The domain root that was crawled
    pub domain: String,

    /// Product URLs in sorted order
    pub product_urls: Vec<String>,

    /// Number of distinct URLs visited
    pub visited: usize,

    pub duration: Duration,
}

/// State shared by every worker of a run
struct Shared {
    state: Mutex<CrawlState>,
    wake: Notify,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, CrawlState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A claimed URL; dropping it without completing still frees the slot
struct InFlight {
    shared: Arc<Shared>,
}

impl InFlight {
    fn complete(self, url: &str, outcome: Option<PageOutcome>) {
        let Some(outcome) = outcome else {
            return;
        };

        let mut state = self.shared.lock();
        if outcome.is_product && state.record_product(url) {
            tracing::debug!("Recorded product {}", url);
        }
        let added = state.enqueue_links(&outcome.links);
        tracing::trace!("{} new links queued from {}", added, url);
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.shared.lock().release();
        self.shared.wake.notify_waiters();
    }
}

/// Crawls one domain with a fixed-size worker pool
pub struct CrawlEngine {
    root: String,
    budget: CrawlBudget,
    strategy: Arc<dyn SiteStrategy>,
    transport: Arc<dyn Transport>,
}

impl CrawlEngine {
    pub fn new(
        root: impl Into<String>,
        budget: CrawlBudget,
        strategy: Arc<dyn SiteStrategy>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            root: root.into(),
            budget,
            strategy,
            transport,
        }
    }

    /// Runs the crawl to completion
    ///
    /// Per-URL failures are logged and skipped. A worker that panics, or a
    /// broken internal invariant, fails the whole run.
    pub async fn run(&self) -> Result<CrawlReport, ScoutError> {
        let started = Instant::now();
        let shared = Arc::new(Shared {
            state: Mutex::new(CrawlState::new()),
            wake: Notify::new(),
        });

        {
            let mut state = shared.lock();
            state.seed(&self.root)?;
            state.start()?;
        }

        tracing::info!(
            "Starting crawl of {} with {} workers (strategy: {}, max URLs: {})",
            self.root,
            self.budget.concurrency,
            self.strategy.name(),
            self.budget.max_urls
        );

        let handles: Vec<_> = (0..self.budget.concurrency)
            .map(|worker_id| {
                tokio::spawn(worker_loop(
                    worker_id,
                    Arc::clone(&shared),
                    Arc::clone(&self.strategy),
                    Arc::clone(&self.transport),
                    self.budget,
                ))
            })
            .collect();

        let mut failure = None;
        for handle in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(ScoutError::from(e)),
            };
            if let Err(e) = result {
                tracing::error!("Crawl worker failed: {}", e);
                failure.get_or_insert(e);
            }
        }
        if let Some(e) = failure {
            return Err(e);
        }

        let mut state = shared.lock();
        state.finish()?;

        let report = CrawlReport {
            domain: self.root.clone(),
            product_urls: state.products(),
            visited: state.visited_count(),
            duration: started.elapsed(),
        };

        tracing::info!(
            "Finished crawling {}: {} product URLs from {} pages in {:.2}s",
            report.domain,
            report.product_urls.len(),
            report.visited,
            report.duration.as_secs_f64()
        );

        Ok(report)
    }
}

async fn worker_loop(
    worker_id: usize,
    shared: Arc<Shared>,
    strategy: Arc<dyn SiteStrategy>,
    transport: Arc<dyn Transport>,
    budget: CrawlBudget,
) -> Result<(), ScoutError> {
    loop {
        // Register for wakeups before looking at the state so a completion
        // between the check and the await is not missed.
        let notified = shared.wake.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        let claim = shared.lock().claim_next(budget.max_urls)?;

        match claim {
            Claim::Url(url) => {
                tracing::debug!("Worker {} processing {}", worker_id, url);
                let slot = InFlight {
                    shared: Arc::clone(&shared),
                };
                let outcome = strategy.fetch_and_classify(&url, &*transport).await;
                slot.complete(&url, outcome);

                if !budget.pacing_delay.is_zero() {
                    tokio::time::sleep(budget.pacing_delay).await;
                }
            }
            Claim::Wait => notified.await,
            Claim::Done => {
                tracing::debug!("Worker {} done", worker_id);
                shared.wake.notify_waiters();
                return Ok(());
            }
        }
    }
}

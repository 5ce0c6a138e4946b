use super::CrawlPhase;
use crate::crawler::UrlFrontier;
use crate::ScoutError;
use std::collections::{BTreeSet, HashSet};

/// What a worker should do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    /// Process this URL; it is already marked visited and counted in flight
    Url(String),

    /// Nothing is queued but other workers may still add links
    Wait,

    /// The run is over for this worker
    Done,
}

/// Everything one crawl run mutates, guarded by a single lock in the engine
///
/// The visited set gates re-processing while the frontier's seen set gates
/// re-queueing. Both hold normalized URLs.
#[derive(Debug, Default)]
pub struct CrawlState {
    frontier: UrlFrontier,
    visited: HashSet<String>,
    products: BTreeSet<String>,
    in_flight: usize,
    phase: CrawlPhase,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Queues the domain root and moves the run to `Seeded`
    pub fn seed(&mut self, root: &str) -> Result<(), ScoutError> {
        self.phase = self.phase.transition(CrawlPhase::Seeded)?;
        self.frontier.add(root);
        Ok(())
    }

    /// Moves a seeded run to `Running`
    pub fn start(&mut self) -> Result<(), ScoutError> {
        self.phase = self.phase.transition(CrawlPhase::Running)?;
        Ok(())
    }

    /// Decides the next step for a worker
    ///
    /// Stops the run once `max_urls` URLs were visited, or once the frontier
    /// is empty with nothing in flight. An empty frontier while other workers
    /// are busy means "wait": they may still enqueue links.
    pub fn claim_next(&mut self, max_urls: usize) -> Result<Claim, ScoutError> {
        loop {
            if self.phase.is_terminal() {
                return Ok(Claim::Done);
            }

            if self.visited.len() >= max_urls {
                self.begin_draining()?;
                return Ok(Claim::Done);
            }

            if self.frontier.is_empty() {
                if self.in_flight == 0 {
                    self.begin_draining()?;
                    return Ok(Claim::Done);
                }
                return Ok(Claim::Wait);
            }

            let url = self.frontier.get()?;
            if self.visited.insert(url.clone()) {
                self.in_flight += 1;
                return Ok(Claim::Url(url));
            }
        }
    }

    /// Marks one claimed URL as finished
    pub fn release(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Adds a product URL, returning true if it was not known yet
    pub fn record_product(&mut self, url: &str) -> bool {
        self.products.insert(url.to_string())
    }

    /// Adds discovered links to the frontier, returning how many were new
    pub fn enqueue_links<I, S>(&mut self, links: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        links
            .into_iter()
            .filter(|link| self.frontier.add(link.as_ref()))
            .count()
    }

    /// Moves a running run to `Draining`; a no-op if already draining
    pub fn begin_draining(&mut self) -> Result<(), ScoutError> {
        if self.phase != CrawlPhase::Draining {
            self.phase = self.phase.transition(CrawlPhase::Draining)?;
        }
        Ok(())
    }

    /// Moves the run to `Done` once every worker has been joined
    pub fn finish(&mut self) -> Result<(), ScoutError> {
        self.begin_draining()?;
        self.phase = self.phase.transition(CrawlPhase::Done)?;
        Ok(())
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn queued(&self) -> usize {
        self.frontier.size()
    }

    /// Product URLs in sorted order
    pub fn products(&self) -> Vec<String> {
        self.products.iter().cloned().collect()
    }
}

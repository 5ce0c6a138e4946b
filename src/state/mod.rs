//! State module for tracking crawl progress
//!
//! This module provides the run-level state shared by crawl workers.
//!
//! # Components
//!
//! - `CrawlPhase`: Lifecycle of one crawl run (idle, seeded, running, draining, done)
//! - `CrawlState`: Frontier, visited set, product set and in-flight counter for one run

mod crawl_phase;
mod crawl_state;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use crawl_state::{Claim, CrawlState};

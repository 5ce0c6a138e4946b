//! Output module for persisting and reporting crawl results
//!
//! This module handles:
//! - Loading, merging and saving the JSON results file
//! - Printing per-domain and end-of-run summaries

mod report;
mod results;

pub use report::{format_domain_report, format_run_summary, print_run_summary};
pub use results::{format_timestamp, DomainMetadata, ResultsFile, RunMetadata, TIMESTAMP_FORMAT};

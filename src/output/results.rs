//! Persisted crawl results
//!
//! Results are a single JSON object keyed by domain root, plus two reserved
//! keys:
//!
//! ```json
//! {
//!   "metadata": { "last_updated": "2024-05-01 10:00:00", "total_domains": 1, ... },
//!   "domain_metadata": {
//!     "https://www.westside.com/": { "crawl_date": "...", "product_count": 2, "duration_seconds": 3.5 }
//!   },
//!   "https://www.westside.com/": ["https://www.westside.com/a-1.html", "..."]
//! }
//! ```
//!
//! A new run merges into whatever an earlier run left in the file.

use crate::crawler::CrawlReport;
use crate::ScoutError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Timestamp format used throughout the results file (UTC)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Run-level metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_domains: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_products: Option<usize>,

    /// SHA-256 of the config file the run used, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
}

/// Per-domain metadata for the most recent crawl of that domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainMetadata {
    pub crawl_date: String,
    pub product_count: usize,
    pub duration_seconds: f64,
}

/// The whole results file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsFile {
    #[serde(default)]
    pub metadata: RunMetadata,

    #[serde(default)]
    pub domain_metadata: BTreeMap<String, DomainMetadata>,

    /// Sorted product URLs per domain root
    #[serde(flatten)]
    pub domains: BTreeMap<String, Vec<String>>,
}

impl ResultsFile {
    /// Loads an existing results file to merge into
    ///
    /// A missing file yields empty results. A file that cannot be read or
    /// parsed is discarded with a warning.
    pub fn load_or_default(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(
                    "Could not read existing results {}: {}, starting fresh",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(results) => {
                tracing::info!("Loaded existing results from {}", path.display());
                results
            }
            Err(e) => {
                tracing::warn!(
                    "Could not parse existing file {}: {}, starting fresh",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Stamps the run metadata at the start of a run
    pub fn begin_run(
        &mut self,
        total_domains: usize,
        config_hash: Option<String>,
        now: DateTime<Utc>,
    ) {
        self.metadata.last_updated = Some(format_timestamp(now));
        self.metadata.total_domains = Some(total_domains);
        if config_hash.is_some() {
            self.metadata.config_hash = config_hash;
        }
    }

    /// Stores one domain's product URLs, replacing any earlier crawl of it
    pub fn record_domain(&mut self, report: &CrawlReport, finished_at: DateTime<Utc>) {
        let mut urls = report.product_urls.clone();
        urls.sort();

        self.domain_metadata.insert(
            report.domain.clone(),
            DomainMetadata {
                crawl_date: format_timestamp(finished_at),
                product_count: urls.len(),
                duration_seconds: report.duration.as_secs_f64(),
            },
        );
        self.domains.insert(report.domain.clone(), urls);
    }

    /// Stamps completion time and the product total across every domain in the file
    pub fn finish(&mut self, now: DateTime<Utc>) {
        self.metadata.completion_time = Some(format_timestamp(now));
        self.metadata.total_products = Some(self.total_products());
    }

    pub fn total_products(&self) -> usize {
        self.domains.values().map(Vec::len).sum()
    }

    /// Writes the results as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ScoutError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

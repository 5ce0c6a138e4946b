//! Product page classification
//!
//! A page is a product page when any one of three independent signals fires:
//!
//! 1. **URL pattern**: the path looks like a product path or the query
//!    carries a product identifier parameter
//! 2. **Content**: product-page phrases appear in the markup, backed up by
//!    price or quantity/size elements when only one phrase is present
//! 3. **Metadata**: JSON-LD, Open Graph or product meta tags declare a product
//!
//! Signals are OR'd together. Evaluation stops at the first positive signal,
//! so the order below only matters for speed.

mod content_signal;
mod metadata_signal;
mod url_signal;

pub use content_signal::{content_signal, count_indicator_phrases, PRODUCT_INDICATORS};
pub use metadata_signal::metadata_signal;
pub use url_signal::{url_signal, PRODUCT_QUERY_PARAMS};

use scraper::Html;
use std::fmt;

/// The heuristic that identified a page as a product page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationSignal {
    /// The URL path or query looks like a product URL
    UrlPattern,

    /// The page text reads like a product page
    Content,

    /// Structured data or meta tags declare a product
    Metadata,

    /// A site strategy's own heuristics matched
    Site,
}

impl ClassificationSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UrlPattern => "url-pattern",
            Self::Content => "content",
            Self::Metadata => "metadata",
            Self::Site => "site",
        }
    }
}

impl fmt::Display for ClassificationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stateless multi-signal product page classifier
///
/// The classifier never fails: markup that cannot be understood simply
/// leaves the corresponding signal negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductClassifier;

impl ProductClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Returns true if the page looks like a product detail page
    ///
    /// # Arguments
    ///
    /// * `url` - The page URL
    /// * `raw_markup` - The response body as received
    /// * `document` - The parsed response body
    pub fn classify(&self, url: &str, raw_markup: &str, document: &Html) -> bool {
        self.detect(url, raw_markup, document).is_some()
    }

    /// Returns the first signal that identifies the page as a product page
    pub fn detect(
        &self,
        url: &str,
        raw_markup: &str,
        document: &Html,
    ) -> Option<ClassificationSignal> {
        if url_signal(url) {
            return Some(ClassificationSignal::UrlPattern);
        }

        if content_signal(raw_markup, document) {
            return Some(ClassificationSignal::Content);
        }

        if metadata_signal(document) {
            return Some(ClassificationSignal::Metadata);
        }

        None
    }
}

//! HTML parsing and generic link extraction
//!
//! `scraper` builds a tree even from broken markup, so parsing itself never
//! fails; malformed input just yields a sparser document.

use crate::url::resolve_link;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

static ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("invalid anchor selector"));

/// Parses a response body into a queryable document
pub fn parse_document(body: &str) -> Html {
    Html::parse_document(body)
}

/// Extracts every anchor link from the document as an absolute URL
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document, resolved against `base_url`
///
/// **Exclude:**
/// - empty hrefs
/// - `javascript:`, `mailto:`, `tel:` and `data:` links
/// - fragment-only links
///
/// # Example
///
/// ```
/// use product_scout::crawler::{extract_anchor_links, parse_document};
/// use url::Url;
///
/// let html = r#"<html><body><a href="/p/123">Kurta</a></body></html>"#;
/// let base_url = Url::parse("https://shop.example/").unwrap();
/// let links = extract_anchor_links(&parse_document(html), &base_url);
/// assert_eq!(links, vec!["https://shop.example/p/123".to_string()]);
/// ```
pub fn extract_anchor_links(document: &Html, base_url: &Url) -> Vec<String> {
    document
        .select(&ANCHORS)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

//! Site profiles: per-site heuristics expressed as data
//!
//! A [`SiteProfile`] is plain configuration (built in, or read from a
//! `[[site]]` table in the TOML config). It is compiled once into a
//! [`CompiledProfile`] and shared by every worker through a
//! [`ProfiledStrategy`].

use super::{GenericStrategy, SiteStrategy};
use crate::classifier::ProductClassifier;
use crate::url::{expand_site_link, first_substring_match, LinkBase};
use crate::ScoutError;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, trace};
use url::Url;

static CLASSED_ELEMENTS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[class]").expect("invalid class selector"));

static CARD_ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("invalid card anchor selector"));

static BUTTONS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("button, a").expect("invalid button selector"));

static PRICE_ELEMENTS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div[class], span[class]").expect("invalid price selector"));

static SIZE_ELEMENTS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div[class], ul[class]").expect("invalid size selector"));

/// Per-site heuristics
///
/// # Example
///
/// ```toml
/// [[site]]
/// domain = "*.example-shop.com"
/// product-url-patterns = ['/item-\d+']
/// excluded-paths = ["/login", "/cart"]
/// link-base = "root"
///
/// [[site.cards]]
/// tags = ["div"]
/// class-terms = ["product-tile"]
/// data-attributes = ["data-url"]
///
/// [site.content]
/// add-to-buttons = true
/// min-price-elements = 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SiteProfile {
    /// Host wildcard pattern such as `*.example-shop.com`
    pub domain: String,

    /// Name used in logs; defaults to the domain pattern
    pub name: Option<String>,

    /// Regexes matched against the page URL
    pub product_url_patterns: Vec<String>,

    /// Regexes matched against the raw response body
    pub markup_patterns: Vec<String>,

    /// URL substrings that are never crawled
    pub excluded_paths: Vec<String>,

    /// URL substrings worth noting in logs; they never change admission
    pub priority_paths: Vec<String>,

    /// Product card containers to mine for extra links
    pub cards: Vec<CardRule>,

    /// How card links that are not absolute get resolved
    pub link_base: LinkBase,

    pub content: ContentHeuristics,
}

/// A product card container and where its link lives
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CardRule {
    /// Element names the card may use (`div`, `li`, `article`, ...)
    pub tags: Vec<String>,

    /// Case-insensitive substrings of the card's class attribute
    pub class_terms: Vec<String>,

    /// Attributes on the card itself that hold a link
    pub data_attributes: Vec<String>,

    /// Use the card's own `href` before looking for a nested anchor
    pub own_href: bool,

    /// Attributes on the nested anchor consulted when its href is empty or `#`
    pub anchor_data_attributes: Vec<String>,
}

/// Markup heuristics that complement the generic content signal
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ContentHeuristics {
    /// A button or link whose text contains "add to"
    pub add_to_buttons: bool,

    /// At least this many `div`/`span` elements with a price or mrp class
    pub min_price_elements: Option<usize>,

    /// A `div`/`ul` with a size class
    pub size_selectors: bool,
}

impl SiteProfile {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.domain)
    }

    /// Compiles every regex in the profile
    ///
    /// # Errors
    ///
    /// `ScoutError::Pattern` naming the first regex that does not compile.
    pub fn compile(self) -> Result<CompiledProfile, ScoutError> {
        let product_url_patterns = compile_patterns(&self.product_url_patterns)?;
        let markup_patterns = compile_patterns(&self.markup_patterns)?;

        Ok(CompiledProfile {
            profile: self,
            product_url_patterns,
            markup_patterns,
        })
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, ScoutError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| ScoutError::Pattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

/// A site profile with its regexes compiled
#[derive(Debug, Clone)]
pub struct CompiledProfile {
    profile: SiteProfile,
    product_url_patterns: Vec<Regex>,
    markup_patterns: Vec<Regex>,
}

impl CompiledProfile {
    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    /// Returns true if any site product signal fires
    pub fn matches(&self, url: &str, raw_markup: &str, document: &Html) -> bool {
        if let Some(pattern) = self.product_url_patterns.iter().find(|re| re.is_match(url)) {
            debug!(
                site = self.profile.display_name(),
                url,
                pattern = pattern.as_str(),
                "Product detected via URL pattern"
            );
            return true;
        }

        if let Some(pattern) = self.markup_patterns.iter().find(|re| re.is_match(raw_markup)) {
            debug!(
                site = self.profile.display_name(),
                url,
                pattern = pattern.as_str(),
                "Product detected via markup"
            );
            return true;
        }

        self.content_matches(document)
    }

    fn content_matches(&self, document: &Html) -> bool {
        let content = &self.profile.content;

        if content.add_to_buttons && document.select(&BUTTONS).any(has_add_to_text) {
            return true;
        }

        if let Some(min) = content.min_price_elements {
            let prices = document
                .select(&PRICE_ELEMENTS)
                .filter(|element| class_contains_any(element, &["price", "mrp"]))
                .count();
            if prices >= min {
                return true;
            }
        }

        content.size_selectors
            && document
                .select(&SIZE_ELEMENTS)
                .any(|element| class_contains_any(&element, &["size"]))
    }

    /// Mines product card containers for links
    pub fn card_links(&self, document: &Html, page: &Url, root: &str) -> Vec<String> {
        if self.profile.cards.is_empty() {
            return Vec::new();
        }

        let mut links = Vec::new();
        for element in document.select(&CLASSED_ELEMENTS) {
            for rule in self.profile.cards.iter().filter(|rule| rule.matches(&element)) {
                let href = rule.card_href(&element);
                let data_links = rule
                    .data_attributes
                    .iter()
                    .filter_map(|attr| element.value().attr(attr));

                links.extend(
                    href.into_iter()
                        .chain(data_links)
                        .filter_map(|href| {
                            expand_site_link(href, page, root, self.profile.link_base)
                        }),
                );
            }
        }
        links
    }
}

impl CardRule {
    fn matches(&self, element: &ElementRef<'_>) -> bool {
        let name = element.value().name();
        self.tags.iter().any(|tag| tag.eq_ignore_ascii_case(name))
            && class_contains_any(element, &self.class_terms)
    }

    fn card_href<'a>(&self, element: &ElementRef<'a>) -> Option<&'a str> {
        if self.own_href {
            if let Some(href) = element.value().attr("href").filter(|h| !h.trim().is_empty()) {
                return Some(href);
            }
        }

        let anchor = element.select(&CARD_ANCHORS).next()?;
        match anchor.value().attr("href").map(str::trim) {
            Some(href) if !href.is_empty() && href != "#" => Some(href),
            _ => self
                .anchor_data_attributes
                .iter()
                .find_map(|attr| anchor.value().attr(attr).filter(|v| !v.trim().is_empty())),
        }
    }
}

fn class_contains_any<S: AsRef<str>>(element: &ElementRef<'_>, terms: &[S]) -> bool {
    let Some(class) = element.value().attr("class") else {
        return false;
    };
    let class = class.to_lowercase();
    terms
        .iter()
        .any(|term| class.contains(&term.as_ref().to_lowercase()))
}

fn has_add_to_text(element: ElementRef<'_>) -> bool {
    element
        .text()
        .collect::<String>()
        .to_lowercase()
        .contains("add to")
}

/// The generic strategy with a site profile layered on top
#[derive(Debug, Clone)]
pub struct ProfiledStrategy {
    generic: GenericStrategy,
    profile: Arc<CompiledProfile>,
}

impl ProfiledStrategy {
    pub fn new(root: Url, profile: Arc<CompiledProfile>) -> Self {
        Self {
            generic: GenericStrategy::new(root),
            profile,
        }
    }

    pub fn profile(&self) -> &CompiledProfile {
        &self.profile
    }
}

#[async_trait]
impl SiteStrategy for ProfiledStrategy {
    fn name(&self) -> &str {
        self.profile.profile().display_name()
    }

    fn root(&self) -> &Url {
        self.generic.root()
    }

    fn classifier(&self) -> &ProductClassifier {
        self.generic.classifier()
    }

    fn extract_links(&self, document: &Html, base_url: &Url) -> Vec<String> {
        let mut links = self.generic.extract_links(document, base_url);
        links.extend(
            self.profile
                .card_links(document, base_url, self.generic.root().as_str()),
        );
        links
    }

    fn should_crawl(&self, url: &str) -> bool {
        if !self.generic.should_crawl(url) {
            return false;
        }

        let profile = self.profile.profile();
        if let Some(path) = first_substring_match(url, &profile.excluded_paths) {
            trace!(url, path, "Skipping excluded path");
            return false;
        }

        if let Some(path) = first_substring_match(url, &profile.priority_paths) {
            trace!(url, path, "Priority path");
        }

        true
    }

    fn extra_signals(&self, url: &str, raw_markup: &str, document: &Html) -> bool {
        self.profile.matches(url, raw_markup, document)
    }
}

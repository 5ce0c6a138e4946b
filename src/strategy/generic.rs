use super::SiteStrategy;
use crate::classifier::ProductClassifier;
use crate::crawler::extract_anchor_links;
use crate::url::{has_fragment, is_static_asset, same_site};
use async_trait::async_trait;
use scraper::Html;
use url::Url;

/// The default strategy: anchor links, same-site admission, generic signals
#[derive(Debug, Clone)]
pub struct GenericStrategy {
    root: Url,
    classifier: ProductClassifier,
}

impl GenericStrategy {
    pub fn new(root: Url) -> Self {
        Self {
            root,
            classifier: ProductClassifier::new(),
        }
    }

    /// Parses the domain root and builds a strategy for it
    pub fn for_root(root: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(root)?))
    }
}

#[async_trait]
impl SiteStrategy for GenericStrategy {
    fn name(&self) -> &str {
        "generic"
    }

    fn root(&self) -> &Url {
        &self.root
    }

    fn classifier(&self) -> &ProductClassifier {
        &self.classifier
    }

    fn extract_links(&self, document: &Html, base_url: &Url) -> Vec<String> {
        extract_anchor_links(document, base_url)
    }

    /// Admits URLs on the root's host and port that are not fragments or
    /// static assets
    fn should_crawl(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };

        same_site(&parsed, &self.root) && !has_fragment(&parsed) && !is_static_asset(&parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> GenericStrategy {
        GenericStrategy::for_root("https://shop.example/").unwrap()
    }

    #[test]
    fn test_should_crawl_same_site() {
        let s = strategy();
        assert!(s.should_crawl("https://shop.example/women"));
        assert!(s.should_crawl("https://SHOP.example/p/1?color=red"));
    }

    #[test]
    fn test_should_crawl_rejects_other_hosts_and_ports() {
        let s = strategy();
        assert!(!s.should_crawl("https://blog.shop.example/post"));
        assert!(!s.should_crawl("https://shop.example:8443/women"));
        assert!(!s.should_crawl("https://other.example/"));
    }

    #[test]
    fn test_should_crawl_rejects_fragments_and_assets() {
        let s = strategy();
        assert!(!s.should_crawl("https://shop.example/women#reviews"));
        assert!(!s.should_crawl("https://shop.example/static/app.js"));
        assert!(!s.should_crawl("https://shop.example/img/banner.JPG"));
        assert!(!s.should_crawl("not a url"));
    }

    #[test]
    fn test_evaluate_page_generic() {
        let s = strategy();
        let base = Url::parse("https://shop.example/").unwrap();
        let body = r#"<html><body>
            <a href="/p/123">Kurta</a>
            <a href="https://other.example/p/9">Elsewhere</a>
            <a href="/theme.css">css</a>
            <button>Add to Cart</button>
        </body></html>"#;

        let outcome = s.evaluate_page("https://shop.example", &base, body);
        assert!(!outcome.is_product);
        assert_eq!(outcome.links, vec!["https://shop.example/p/123"]);

        let outcome = s.evaluate_page("https://shop.example/p/123", &base, "<html></html>");
        assert!(outcome.is_product);
        assert_eq!(
            outcome.signal,
            Some(crate::classifier::ClassificationSignal::UrlPattern)
        );
    }
}

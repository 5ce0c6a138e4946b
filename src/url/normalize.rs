use serde::Deserialize;
use url::Url;

/// Link schemes that never lead to a crawlable page
const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// How a site resolves root-relative and bare relative links found in cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkBase {
    /// Resolve against the page the link was found on
    #[default]
    Page,
    /// Prefix with the crawl root, ignoring the current page path
    Root,
}

/// Normalizes a URL for frontier identity
///
/// Normalization is purely syntactic: trailing slashes are trimmed and
/// nothing else changes. Malformed URLs pass through untouched.
///
/// # Examples
///
/// ```
/// use product_scout::url::normalize_frontier_url;
///
/// assert_eq!(normalize_frontier_url("https://x/a/"), "https://x/a");
/// assert_eq!(normalize_frontier_url("https://shop.example/"), "https://shop.example");
/// assert_eq!(normalize_frontier_url("not a url/"), "not a url");
/// ```
pub fn normalize_frontier_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Resolves an anchor href to an absolute HTTP(S) URL
///
/// Returns None if the link should be skipped:
/// - empty hrefs
/// - `javascript:`, `mailto:`, `tel:` and `data:` links
/// - fragment-only links (same page anchors)
/// - anything that does not resolve to HTTP or HTTPS
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') || has_skipped_scheme(href) {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url.to_string())
        }
        _ => None,
    }
}

/// Expands a link mined from a product card using site conventions
///
/// Shop templates often emit protocol-relative (`//cdn...`) or bare paths in
/// data attributes. The expansion rules are:
///
/// 1. `//host/path` becomes `https://host/path`
/// 2. `/path` is prefixed with the page origin or the crawl root, per `base`
/// 3. absolute `http(s)://` links are kept as they are
/// 4. anything else is joined to the page (`Page`) or appended to the root (`Root`)
pub fn expand_site_link(href: &str, page: &Url, root: &str, base: LinkBase) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href == "#" || has_skipped_scheme(href) {
        return None;
    }

    if href.starts_with("//") {
        return Some(format!("https:{}", href));
    }

    let root = root.trim_end_matches('/');

    if href.starts_with('/') {
        return Some(match base {
            LinkBase::Page => format!("{}{}", page.origin().ascii_serialization(), href),
            LinkBase::Root => format!("{}{}", root, href),
        });
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        return Some(href.to_string());
    }

    match base {
        LinkBase::Page => page.join(href).ok().map(|url| url.to_string()),
        LinkBase::Root => Some(format!("{}/{}", root, href.trim_start_matches('/'))),
    }
}

fn has_skipped_scheme(href: &str) -> bool {
    let lowered = href.to_ascii_lowercase();
    SKIPPED_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
}

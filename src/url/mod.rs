//! URL handling module for Product Scout
//!
//! This module provides frontier normalization, site-specific link expansion,
//! host comparison, wildcard matching for site profiles, and static-asset
//! detection.

mod domain;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::{extract_host, same_site};
pub use matcher::{first_substring_match, matches_wildcard};
pub use normalize::{expand_site_link, normalize_frontier_url, resolve_link, LinkBase};

use url::Url;

/// File extensions that never lead to a document worth fetching
const STATIC_ASSET_EXTENSIONS: &[&str] = &[".css", ".js", ".jpg", ".jpeg", ".png", ".gif", ".svg"];

/// Returns true if the URL path ends in a stylesheet, script, or image extension
///
/// # Examples
///
/// ```
/// use url::Url;
/// use product_scout::url::is_static_asset;
///
/// assert!(is_static_asset(&Url::parse("https://shop.example/theme.css").unwrap()));
/// assert!(is_static_asset(&Url::parse("https://shop.example/img/LOGO.PNG").unwrap()));
/// assert!(!is_static_asset(&Url::parse("https://shop.example/p/123").unwrap()));
/// ```
pub fn is_static_asset(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    STATIC_ASSET_EXTENSIONS
        .iter()
        .any(|extension| path.ends_with(extension))
}

/// Returns true if the URL carries a non-empty fragment component
pub fn has_fragment(url: &Url) -> bool {
    url.fragment().map_or(false, |fragment| !fragment.is_empty())
}

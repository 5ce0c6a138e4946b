use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Path fragments that commonly prefix product detail pages
const PRODUCT_PATH_PATTERNS: &[&str] = &[
    r"/product/",
    r"/p/",
    r"/item/",
    r"/products/",
    r"/pd/",
    r"/buy/",
    r"/shop/",
];

/// Query parameter names that identify a single product
pub const PRODUCT_QUERY_PARAMS: &[&str] =
    &["product", "productId", "pid", "itemId", "sku", "productCode"];

static PRODUCT_PATHS: Lazy<Vec<Regex>> = Lazy::new(|| {
    PRODUCT_PATH_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("invalid product path pattern"))
        .collect()
});

/// Returns true if the URL looks like a product URL
///
/// The path is matched against the product path patterns and the query is
/// checked for a product identifier parameter carrying a value. URLs that do
/// not parse are matched as raw strings against the path patterns only.
///
/// # Examples
///
/// ```
/// use product_scout::classifier::url_signal;
///
/// assert!(url_signal("https://shop.example/p/123"));
/// assert!(url_signal("https://shop.example/view?sku=AB-12"));
/// assert!(!url_signal("https://shop.example/collections/summer"));
/// ```
pub fn url_signal(url: &str) -> bool {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return PRODUCT_PATHS.iter().any(|pattern| pattern.is_match(url)),
    };

    if PRODUCT_PATHS
        .iter()
        .any(|pattern| pattern.is_match(parsed.path()))
    {
        return true;
    }

    parsed
        .query_pairs()
        .any(|(key, value)| !value.is_empty() && PRODUCT_QUERY_PARAMS.contains(&key.as_ref()))
}

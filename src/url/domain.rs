use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use product_scout::url::extract_host;
///
/// let url = Url::parse("https://WWW.Virgio.com/collections").unwrap();
/// assert_eq!(extract_host(&url), Some("www.virgio.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if both URLs share the same network location (host and port)
///
/// Scheme differences are ignored as long as the effective port matches, so
/// `http://a` and `https://a` are different sites (ports 80 and 443).
pub fn same_site(a: &Url, b: &Url) -> bool {
    match (extract_host(a), extract_host(b)) {
        (Some(host_a), Some(host_b)) => {
            host_a == host_b && a.port_or_known_default() == b.port_or_known_default()
        }
        _ => false,
    }
}

/// Checks if a host matches a site domain pattern
///
/// Two kinds of patterns are supported:
/// 1. Exact: `"nykaafashion.com"` matches only `"nykaafashion.com"`
/// 2. Wildcard: `"*.westside.com"` matches `"westside.com"`,
///    `"www.westside.com"` and any deeper subdomain
///
/// Hosts are expected to be lowercase already.
///
/// # Examples
///
/// ```
/// use product_scout::url::matches_wildcard;
///
/// assert!(matches_wildcard("nykaafashion.com", "nykaafashion.com"));
/// assert!(!matches_wildcard("nykaafashion.com", "www.nykaafashion.com"));
///
/// assert!(matches_wildcard("*.westside.com", "westside.com"));
/// assert!(matches_wildcard("*.westside.com", "www.westside.com"));
/// assert!(!matches_wildcard("*.westside.com", "notwestside.com"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    if let Some(base) = pattern.strip_prefix("*.") {
        candidate == base || candidate.ends_with(&format!(".{}", base))
    } else {
        candidate == pattern
    }
}

/// Returns the first needle contained in the haystack, if any
///
/// Used for the excluded/priority path lists of site profiles, which are
/// plain substrings rather than patterns.
pub fn first_substring_match<'a>(haystack: &str, needles: &'a [String]) -> Option<&'a str> {
    needles
        .iter()
        .map(String::as_str)
        .find(|needle| !needle.is_empty() && haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(matches_wildcard("tatacliq.com", "tatacliq.com"));
        assert!(!matches_wildcard("tatacliq.com", "www.tatacliq.com"));
        assert!(!matches_wildcard("tatacliq.com", "tatacliq.co"));
    }

    #[test]
    fn test_wildcard_matches_bare_and_subdomains() {
        assert!(matches_wildcard("*.virgio.com", "virgio.com"));
        assert!(matches_wildcard("*.virgio.com", "www.virgio.com"));
        assert!(matches_wildcard("*.virgio.com", "m.shop.virgio.com"));
    }

    #[test]
    fn test_wildcard_no_partial_match() {
        assert!(!matches_wildcard("*.virgio.com", "myvirgio.com"));
        assert!(!matches_wildcard("*.virgio.com", "virgio.com.evil.org"));
        assert!(!matches_wildcard("*.virgio.com", ""));
    }

    #[test]
    fn test_first_substring_match() {
        let needles = vec!["/cart".to_string(), "/login".to_string()];

        assert_eq!(
            first_substring_match("https://shop.example/cart/items", &needles),
            Some("/cart")
        );
        assert_eq!(
            first_substring_match("https://shop.example/login", &needles),
            Some("/login")
        );
        assert_eq!(
            first_substring_match("https://shop.example/p/1", &needles),
            None
        );
    }

    #[test]
    fn test_empty_needles_never_match() {
        let needles = vec![String::new()];
        assert_eq!(first_substring_match("https://shop.example/", &needles), None);
        assert_eq!(first_substring_match("https://shop.example/", &[]), None);
    }
}

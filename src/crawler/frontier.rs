//! Deduplicating FIFO frontier of URLs waiting to be fetched

use crate::url::normalize_frontier_url;
use crate::ScoutError;
use std::collections::{HashSet, VecDeque};

/// Pending URLs in insertion order, plus every URL ever admitted
///
/// A URL is enqueued at most once over the frontier's lifetime, no matter how
/// many times it is added. Identity is the normalized (trailing-slash free)
/// URL string. The frontier does not stop a dequeued URL from being
/// processed twice; the engine's visited set does that.
#[derive(Debug, Default)]
pub struct UrlFrontier {
    queue: VecDeque<String>,
    seen: HashSet<String>,
}

impl UrlFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes and enqueues a URL unless it was admitted before
    ///
    /// Returns true if the URL was newly enqueued.
    pub fn add(&mut self, url: &str) -> bool {
        let normalized = normalize_frontier_url(url);
        if self.seen.contains(&normalized) {
            return false;
        }

        self.seen.insert(normalized.clone());
        self.queue.push_back(normalized);
        true
    }

    /// Removes and returns the oldest queued URL
    ///
    /// # Errors
    ///
    /// `ScoutError::FrontierEmpty` if nothing is queued. Callers are expected
    /// to check [`UrlFrontier::is_empty`] first.
    pub fn get(&mut self) -> Result<String, ScoutError> {
        self.queue.pop_front().ok_or(ScoutError::FrontierEmpty)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued URLs
    pub fn size(&self) -> usize {
        self.queue.len()
    }

    /// Number of URLs ever admitted
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frontier_is_empty() {
        let frontier = UrlFrontier::new();
        assert!(frontier.is_empty());
        assert_eq!(frontier.size(), 0);
        assert_eq!(frontier.seen_count(), 0);
    }

    #[test]
    fn test_trailing_slash_variants_are_one_entry() {
        let mut frontier = UrlFrontier::new();
        assert!(frontier.add("https://x/a/"));
        assert!(!frontier.add("https://x/a"));

        assert_eq!(frontier.size(), 1);
        assert_eq!(frontier.get().unwrap(), "https://x/a");
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = UrlFrontier::new();
        frontier.add("https://x/3");
        frontier.add("https://x/1");
        frontier.add("https://x/2");
        frontier.add("https://x/1/");

        assert_eq!(frontier.get().unwrap(), "https://x/3");
        assert_eq!(frontier.get().unwrap(), "https://x/1");
        assert_eq!(frontier.get().unwrap(), "https://x/2");
    }

    #[test]
    fn test_dequeued_url_is_never_requeued() {
        let mut frontier = UrlFrontier::new();
        frontier.add("https://x/a");
        frontier.get().unwrap();

        assert!(!frontier.add("https://x/a/"));
        assert!(frontier.is_empty());
        assert_eq!(frontier.seen_count(), 1);
    }

    #[test]
    fn test_get_on_empty_frontier_fails() {
        let mut frontier = UrlFrontier::new();
        assert!(matches!(frontier.get(), Err(ScoutError::FrontierEmpty)));
    }

    #[test]
    fn test_malformed_urls_stored_as_is() {
        let mut frontier = UrlFrontier::new();
        frontier.add("not a url/");
        assert_eq!(frontier.get().unwrap(), "not a url");
    }

    #[test]
    fn test_many_duplicate_adds() {
        let mut frontier = UrlFrontier::new();
        for _ in 0..5 {
            for path in ["a", "b/", "c"] {
                frontier.add(&format!("https://x/{}", path));
            }
        }

        let mut drained = Vec::new();
        while !frontier.is_empty() {
            drained.push(frontier.get().unwrap());
        }
        assert_eq!(drained, vec!["https://x/a", "https://x/b", "https://x/c"]);
    }
}

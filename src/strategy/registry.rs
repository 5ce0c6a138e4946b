use super::{
    builtin_profiles, CompiledProfile, GenericStrategy, ProfiledStrategy, SiteProfile,
    SiteStrategy,
};
use crate::url::{extract_host, matches_wildcard};
use crate::ScoutError;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Maps domain patterns to site profiles
///
/// Resolution happens once per crawl run. A root whose host matches no
/// profile gets the [`GenericStrategy`].
#[derive(Debug, Default, Clone)]
pub struct StrategyRegistry {
    profiles: Vec<Arc<CompiledProfile>>,
}

impl StrategyRegistry {
    /// Creates an empty registry that resolves everything to the generic strategy
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in storefront profiles
    pub fn with_builtin_sites() -> Result<Self, ScoutError> {
        let mut registry = Self::new();
        for profile in builtin_profiles() {
            registry.register(profile)?;
        }
        Ok(registry)
    }

    /// Adds a profile, replacing any profile for the same domain pattern
    pub fn register(&mut self, profile: SiteProfile) -> Result<(), ScoutError> {
        let compiled = Arc::new(profile.compile()?);
        let domain = compiled.profile().domain.to_lowercase();

        match self
            .profiles
            .iter_mut()
            .find(|existing| existing.profile().domain.to_lowercase() == domain)
        {
            Some(existing) => {
                debug!(domain = %domain, "Replacing site profile");
                *existing = compiled;
            }
            None => self.profiles.push(compiled),
        }
        Ok(())
    }

    /// Picks the strategy for a domain root
    ///
    /// # Errors
    ///
    /// `ScoutError::UrlParse` if the root is not a valid URL.
    pub fn resolve(&self, root: &str) -> Result<Arc<dyn SiteStrategy>, ScoutError> {
        let root_url = Url::parse(root)?;
        let host = extract_host(&root_url).unwrap_or_default();

        let strategy: Arc<dyn SiteStrategy> = match self.find(&host) {
            Some(profile) => Arc::new(ProfiledStrategy::new(root_url, Arc::clone(profile))),
            None => Arc::new(GenericStrategy::new(root_url)),
        };

        debug!(root, strategy = strategy.name(), "Resolved site strategy");
        Ok(strategy)
    }

    fn find(&self, host: &str) -> Option<&Arc<CompiledProfile>> {
        self.profiles
            .iter()
            .find(|profile| matches_wildcard(&profile.profile().domain.to_lowercase(), host))
    }

    /// Domain patterns in registration order
    pub fn domains(&self) -> Vec<&str> {
        self.profiles
            .iter()
            .map(|profile| profile.profile().domain.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sites_resolve() {
        let registry = StrategyRegistry::with_builtin_sites().unwrap();
        assert_eq!(registry.len(), 4);

        assert_eq!(registry.resolve("https://www.virgio.com/").unwrap().name(), "virgio");
        assert_eq!(registry.resolve("https://www.tatacliq.com/").unwrap().name(), "tatacliq");
        assert_eq!(registry.resolve("https://nykaafashion.com/").unwrap().name(), "nykaafashion");
        assert_eq!(registry.resolve("https://WWW.Westside.com/").unwrap().name(), "westside");
    }

    #[test]
    fn test_unknown_domain_falls_back_to_generic() {
        let registry = StrategyRegistry::with_builtin_sites().unwrap();
        let strategy = registry.resolve("https://shop.example/").unwrap();
        assert_eq!(strategy.name(), "generic");
        assert_eq!(strategy.root().as_str(), "https://shop.example/");
    }

    #[test]
    fn test_lookalike_hosts_do_not_match() {
        let registry = StrategyRegistry::with_builtin_sites().unwrap();
        assert_eq!(registry.resolve("https://notvirgio.com/").unwrap().name(), "generic");
    }

    #[test]
    fn test_invalid_root() {
        let registry = StrategyRegistry::new();
        assert!(matches!(
            registry.resolve("not a url"),
            Err(ScoutError::UrlParse(_))
        ));
    }

    #[test]
    fn test_register_replaces_same_domain() {
        let mut registry = StrategyRegistry::with_builtin_sites().unwrap();
        registry
            .register(SiteProfile {
                domain: "*.Westside.com".to_string(),
                name: Some("westside-custom".to_string()),
                ..SiteProfile::default()
            })
            .unwrap();

        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.resolve("https://www.westside.com/").unwrap().name(),
            "westside-custom"
        );
    }

    #[test]
    fn test_register_new_domain() {
        let mut registry = StrategyRegistry::new();
        registry
            .register(SiteProfile {
                domain: "*.example-shop.com".to_string(),
                product_url_patterns: vec![r"/item-\d+".to_string()],
                ..SiteProfile::default()
            })
            .unwrap();

        assert_eq!(registry.domains(), vec!["*.example-shop.com"]);
        assert_eq!(
            registry.resolve("https://www.example-shop.com/").unwrap().name(),
            "*.example-shop.com"
        );
    }

    #[test]
    fn test_register_rejects_bad_regex() {
        let mut registry = StrategyRegistry::new();
        let result = registry.register(SiteProfile {
            domain: "*.example-shop.com".to_string(),
            product_url_patterns: vec!["[".to_string()],
            ..SiteProfile::default()
        });
        assert!(matches!(result, Err(ScoutError::Pattern { .. })));
        assert!(registry.is_empty());
    }
}

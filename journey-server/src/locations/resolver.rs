//! Place name → location code resolution with caching.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{CacheConfig, LocationCache};
use crate::domain::{LocationCode, normalize_place_name};
use crate::upstream::UpstreamError;

use super::client::LocationCandidate;

/// Upstream lookup of candidate codes for a place name.
///
/// This abstraction allows the resolver to be tested without network access.
pub trait LocationLookup: Send + Sync {
    /// Search candidates for a normalized place name.
    fn lookup(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<LocationCandidate>, UpstreamError>> + Send;
}

/// Resolves place names to provider codes, caching successful lookups.
///
/// Never fails: any upstream error, or a lookup with no usable candidate,
/// yields `None` and a warning event.
pub struct LocationResolver<L> {
    lookup: L,
    cache: LocationCache,
    provider: &'static str,
}

impl<L: LocationLookup> LocationResolver<L> {
    /// Create a resolver. `provider` names the code space in log events
    /// (e.g. "airport", "station").
    pub fn new(lookup: L, cache_config: &CacheConfig, provider: &'static str) -> Self {
        Self {
            lookup,
            cache: LocationCache::new(cache_config),
            provider,
        }
    }

    /// Resolve a free-text place name to a code.
    pub async fn resolve(&self, place_name: &str) -> Option<LocationCode> {
        let key = normalize_place_name(place_name);
        if key.is_empty() {
            warn!(
                provider = self.provider,
                failure = "unresolved_location",
                place = place_name,
                "Empty place name, not looking up"
            );
            return None;
        }

        let fetch = self.fetch(&key);
        self.cache.get_or_resolve(key.clone(), fetch).await
    }

    /// Resolve under a time budget. A lookup that overruns, including time
    /// spent queued behind other lookups, counts as unresolved.
    pub async fn resolve_within(&self, place_name: &str, budget: Duration) -> Option<LocationCode> {
        match tokio::time::timeout(budget, self.resolve(place_name)).await {
            Ok(code) => code,
            Err(_) => {
                warn!(
                    provider = self.provider,
                    failure = "timeout",
                    place = place_name,
                    budget_ms = budget.as_millis() as u64,
                    "Location lookup exceeded its budget"
                );
                None
            }
        }
    }

    /// Number of cached codes.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drop all cached codes.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }

    async fn fetch(&self, key: &str) -> Option<LocationCode> {
        match self.lookup.lookup(key).await {
            Ok(candidates) => {
                let code = best_match(key, &candidates);
                match &code {
                    Some(code) => debug!(
                        provider = self.provider,
                        place = key,
                        code = %code,
                        "Resolved location code"
                    ),
                    None => warn!(
                        provider = self.provider,
                        failure = "unresolved_location",
                        place = key,
                        candidates = candidates.len(),
                        "No usable location code"
                    ),
                }
                code
            }
            Err(e) => {
                warn!(
                    provider = self.provider,
                    failure = e.failure_kind(),
                    place = key,
                    error = %e,
                    "Location lookup failed"
                );
                None
            }
        }
    }
}

/// Pick the best candidate for a normalized key.
///
/// A candidate whose name or code matches the key exactly wins; otherwise the
/// first candidate is used. Candidates without a usable code (empty, or
/// containing whitespace) are skipped.
pub fn best_match(key: &str, candidates: &[LocationCandidate]) -> Option<LocationCode> {
    let mut valid = candidates.iter().filter_map(|c| match LocationCode::parse(&c.code) {
        Ok(code) => Some((c, code)),
        Err(e) => {
            debug!(place = key, code = %c.code, error = %e, "Skipping location candidate");
            None
        }
    });

    let first = valid.next()?;
    if is_exact(key, first.0) {
        return Some(first.1);
    }

    valid
        .find(|(candidate, _)| is_exact(key, candidate))
        .map(|(_, code)| code)
        .or(Some(first.1))
}

fn is_exact(key: &str, candidate: &LocationCandidate) -> bool {
    normalize_place_name(&candidate.name) == key || candidate.code.trim().eq_ignore_ascii_case(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn candidate(name: &str, code: &str) -> LocationCandidate {
        LocationCandidate {
            name: name.to_string(),
            code: code.to_string(),
        }
    }

    fn code(s: &str) -> LocationCode {
        LocationCode::parse(s).unwrap()
    }

    /// Mock lookup API that counts calls.
    struct MockLookup {
        results: HashMap<String, Vec<LocationCandidate>>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl MockLookup {
        fn new() -> Self {
            Self {
                results: HashMap::new(),
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn with(mut self, query: &str, candidates: Vec<LocationCandidate>) -> Self {
            self.results.insert(query.to_string(), candidates);
            self
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl LocationLookup for MockLookup {
        async fn lookup(&self, query: &str) -> Result<Vec<LocationCandidate>, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(UpstreamError::Api {
                    status: 503,
                    message: "unavailable".into(),
                });
            }
            Ok(self.results.get(query).cloned().unwrap_or_default())
        }
    }

    #[test]
    fn best_match_prefers_exact_name() {
        let candidates = vec![
            candidate("Vapi Gate", "VPG"),
            candidate("Vapi", "VAPI"),
        ];
        assert_eq!(best_match("vapi", &candidates), Some(code("VAPI")));
    }

    #[test]
    fn best_match_accepts_exact_code() {
        let candidates = vec![
            candidate("Chhatrapati Shivaji Terminus", "CSMT"),
            candidate("Mumbai Central", "BCT"),
        ];
        assert_eq!(best_match("bct", &candidates), Some(code("BCT")));
    }

    #[test]
    fn best_match_falls_back_to_first() {
        let candidates = vec![
            candidate("Pune Junction", "PUNE"),
            candidate("Shivajinagar", "SVJR"),
        ];
        assert_eq!(best_match("pune city", &candidates), Some(code("PUNE")));
    }

    #[test]
    fn best_match_skips_malformed_codes() {
        let candidates = vec![candidate("Pune", "PUNE JN"), candidate("Pune", "PUNE")];
        assert_eq!(best_match("pune", &candidates), Some(code("PUNE")));
        assert_eq!(best_match("pune", &[]), None);
    }

    #[test]
    fn best_match_keeps_provider_specific_codes() {
        let candidates = vec![candidate("Chhatrapati Shivaji Intl", "BOM.AIRPORT")];
        assert_eq!(best_match("mumbai", &candidates), Some(code("BOM.AIRPORT")));

        let entity = "eyJlIjoiOTU2NzMzMjAiLCJzIjoiQk9NIn0=";
        let candidates = vec![candidate("Mumbai", entity)];
        assert_eq!(best_match("mumbai", &candidates), Some(code(entity)));
    }

    struct SlowLookup;

    impl LocationLookup for SlowLookup {
        async fn lookup(&self, query: &str) -> Result<Vec<LocationCandidate>, UpstreamError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![candidate(query, "SLOW")])
        }
    }

    #[tokio::test]
    async fn resolve_within_gives_up_on_slow_lookup() {
        let resolver = LocationResolver::new(SlowLookup, &CacheConfig::default(), "station");

        let started = std::time::Instant::now();
        let resolved = resolver
            .resolve_within("Vapi", Duration::from_millis(50))
            .await;

        assert_eq!(resolved, None);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(resolver.cache_entry_count(), 0);
    }

    #[tokio::test]
    async fn resolve_within_passes_fast_lookup_through() {
        let lookup = MockLookup::new().with("vapi", vec![candidate("Vapi", "VAPI")]);
        let resolver = LocationResolver::new(lookup, &CacheConfig::default(), "station");

        let resolved = resolver.resolve_within("Vapi", Duration::from_secs(5)).await;
        assert_eq!(resolved, Some(code("VAPI")));
    }

    #[tokio::test]
    async fn resolves_and_caches() {
        let lookup = MockLookup::new().with("vapi", vec![candidate("Vapi", "VAPI")]);
        let resolver = LocationResolver::new(lookup, &CacheConfig::default(), "station");

        assert_eq!(resolver.resolve("Vapi, India").await, Some(code("VAPI")));
        assert_eq!(resolver.resolve("  vapi ").await, Some(code("VAPI")));
        assert_eq!(resolver.lookup.call_count(), 1);
    }

    #[tokio::test]
    async fn upstream_failure_yields_none_and_is_retried() {
        let resolver = LocationResolver::new(MockLookup::failing(), &CacheConfig::default(), "airport");

        assert_eq!(resolver.resolve("Pune").await, None);
        assert_eq!(resolver.resolve("Pune").await, None);
        assert_eq!(resolver.lookup.call_count(), 2);
    }

    #[tokio::test]
    async fn empty_result_yields_none() {
        let resolver = LocationResolver::new(MockLookup::new(), &CacheConfig::default(), "station");
        assert_eq!(resolver.resolve("Atlantis").await, None);
    }

    #[tokio::test]
    async fn empty_name_skips_lookup() {
        let resolver = LocationResolver::new(MockLookup::new(), &CacheConfig::default(), "station");
        assert_eq!(resolver.resolve(" , India").await, None);
        assert_eq!(resolver.lookup.call_count(), 0);
    }

    #[tokio::test]
    async fn concurrent_lookups_share_one_call() {
        let lookup = MockLookup::new().with("pune", vec![candidate("Pune", "PUNE")]);
        let resolver = LocationResolver::new(lookup, &CacheConfig::default(), "station");

        let (a, b) = tokio::join!(resolver.resolve("Pune"), resolver.resolve("PUNE, India"));
        assert_eq!(a, Some(code("PUNE")));
        assert_eq!(b, Some(code("PUNE")));
        assert_eq!(resolver.lookup.call_count(), 1);
    }
}

//! Caching layer for location code lookups.
//!
//! Place names resolve to the same provider code for a long time, so each
//! resolver keeps a process-wide cache keyed by normalized name. The cache
//! is bounded and entries expire, so a long-running server neither grows
//! without limit nor holds on to codes a provider has since retired.
//!
//! Only successful lookups are stored. A failed lookup is retried on the
//! next request.

use std::future::Future;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::LocationCode;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Concurrency-safe cache of normalized place name → location code.
#[derive(Clone)]
pub struct LocationCache {
    codes: MokaCache<String, LocationCode>,
}

impl LocationCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let codes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { codes }
    }

    /// Get a cached code.
    pub async fn get(&self, key: &str) -> Option<LocationCode> {
        self.codes.get(key).await
    }

    /// Insert a code into the cache.
    pub async fn insert(&self, key: String, code: LocationCode) {
        self.codes.insert(key, code).await;
    }

    /// Return the cached code for `key`, or run `resolve` and cache its result.
    ///
    /// Concurrent callers for the same key share a single `resolve` run.
    /// A `None` result is not cached.
    pub async fn get_or_resolve<F>(&self, key: String, resolve: F) -> Option<LocationCode>
    where
        F: Future<Output = Option<LocationCode>>,
    {
        self.codes.optionally_get_with(key, resolve).await
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.codes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.codes.invalidate_all();
    }
}

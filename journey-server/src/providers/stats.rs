//! Per-adapter counters.
//!
//! Lets operators tell "no routes exist" (searches returning empty) apart
//! from "provider is down" (failures).

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Running counters for one adapter.
#[derive(Debug, Default)]
pub struct AdapterStats {
    searches: AtomicU64,
    failures: AtomicU64,
    unresolved: AtomicU64,
    empty: AtomicU64,
}

/// Point-in-time copy of [`AdapterStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub searches: u64,
    pub failures: u64,
    pub unresolved: u64,
    pub empty: u64,
}

impl AdapterStats {
    pub fn record_search(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }

    /// An upstream call failed or timed out.
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// A place name could not be resolved to a provider code.
    pub fn record_unresolved(&self) {
        self.unresolved.fetch_add(1, Ordering::Relaxed);
    }

    /// A search completed but produced no options.
    pub fn record_empty(&self) {
        self.empty.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            searches: self.searches.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            unresolved: self.unresolved.load(Ordering::Relaxed),
            empty: self.empty.load(Ordering::Relaxed),
        }
    }
}

//! Transport provider adapters.
//!
//! Each adapter wraps one external API and maps its payload into
//! [`TransportOption`]s. Adapters absorb every failure: the planner always
//! receives a (possibly empty) list and never a provider-specific error.
//! Failures are still visible as `warn!` events with a `failure` field and in
//! per-adapter [`AdapterStats`].

pub mod flight;
pub mod rail;
mod stats;
pub mod transfer;

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::warn;

use crate::domain::TransportOption;
use crate::upstream::UpstreamError;

pub use stats::{AdapterStats, StatsSnapshot};

/// Everything a provider needs to search one origin/destination pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegQuery {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    /// ISO currency code for prices, e.g. "INR".
    pub currency: String,
    /// Provider-specific class code ("SL", "3A", "economy", ...).
    pub class_preference: Option<String>,
}

/// Trait for searching transport options between two places.
///
/// This abstraction allows the planner to be tested with mock providers.
pub trait TransportSearch: Send + Sync {
    /// Provider name used in log events.
    fn name(&self) -> &'static str;

    /// Search options for a leg. Never fails; errors yield an empty list.
    fn search(&self, query: &LegQuery) -> impl Future<Output = Vec<TransportOption>> + Send;
}

/// Run one upstream call under a time budget, absorbing any failure.
///
/// Failures are logged and counted; the caller sees `None`.
pub(crate) async fn absorb<T, F>(
    provider: &'static str,
    stats: &AdapterStats,
    budget: Duration,
    call: F,
) -> Option<T>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    let error = match tokio::time::timeout(budget, call).await {
        Ok(Ok(value)) => return Some(value),
        Ok(Err(e)) => e,
        Err(_) => UpstreamError::Timeout,
    };

    stats.record_failure();
    warn!(
        provider,
        failure = error.failure_kind(),
        error = %error,
        "Provider call failed, returning no options"
    );
    None
}

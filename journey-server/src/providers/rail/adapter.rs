//! Rail adapter: station resolution, train search, per-train availability.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{LocationCode, TransportOption};
use crate::locations::{LocationLookup, LocationResolver};
use crate::providers::{AdapterStats, LegQuery, TransportSearch, absorb};

use super::client::RailApi;
use super::convert::{AvailabilityLookup, convert_train};
use super::types::{SeatAvailabilityRequest, TrainSearchRequest};

/// Class codes the rail API understands.
const RAIL_CLASSES: [&str; 9] = ["1A", "2A", "3A", "3E", "SL", "CC", "EC", "2S", "FC"];

/// Configuration for the rail adapter.
#[derive(Debug, Clone)]
pub struct RailAdapterConfig {
    /// Maximum trains kept per search; each costs one availability call.
    pub max_trains: usize,

    /// Time budget for each upstream call.
    pub call_timeout: Duration,

    /// Class used when the traveler's preference is not a rail class.
    pub default_class: String,

    /// Booking quota for availability lookups.
    pub quota: String,
}

impl Default for RailAdapterConfig {
    fn default() -> Self {
        Self {
            max_trains: 4,
            call_timeout: Duration::from_secs(6),
            default_class: "SL".to_string(),
            quota: "GN".to_string(),
        }
    }
}

/// Rail provider adapter.
pub struct RailAdapter<A, L> {
    api: A,
    stations: Arc<LocationResolver<L>>,
    config: RailAdapterConfig,
    stats: AdapterStats,
}

impl<A: RailApi, L: LocationLookup> RailAdapter<A, L> {
    pub fn new(api: A, stations: Arc<LocationResolver<L>>, config: RailAdapterConfig) -> Self {
        Self {
            api,
            stations,
            config,
            stats: AdapterStats::default(),
        }
    }

    pub fn stats(&self) -> &AdapterStats {
        &self.stats
    }

    /// Rail class for a preference, falling back to the configured default.
    fn class_code(&self, preference: Option<&str>) -> String {
        preference
            .map(|p| p.trim().to_uppercase())
            .filter(|p| RAIL_CLASSES.contains(&p.as_str()))
            .unwrap_or_else(|| self.config.default_class.clone())
    }

    async fn availability(&self, request: SeatAvailabilityRequest) -> AvailabilityLookup {
        match absorb(
            self.name(),
            &self.stats,
            self.config.call_timeout,
            self.api.seat_availability(&request),
        )
        .await
        {
            Some(rows) => AvailabilityLookup::Rows(rows),
            None => AvailabilityLookup::Failed,
        }
    }

    fn availability_request(
        &self,
        train_number: &str,
        class_code: &str,
        query: &LegQuery,
        from: &LocationCode,
        to: &LocationCode,
    ) -> SeatAvailabilityRequest {
        SeatAvailabilityRequest {
            train_number: train_number.to_string(),
            class_code: class_code.to_string(),
            date: query.date,
            from_station: from.to_string(),
            to_station: to.to_string(),
            quota: self.config.quota.clone(),
        }
    }
}

impl<A: RailApi, L: LocationLookup> TransportSearch for RailAdapter<A, L> {
    fn name(&self) -> &'static str {
        "rail"
    }

    async fn search(&self, query: &LegQuery) -> Vec<TransportOption> {
        self.stats.record_search();

        let budget = self.config.call_timeout;
        let (from, to) = tokio::join!(
            self.stations.resolve_within(&query.origin, budget),
            self.stations.resolve_within(&query.destination, budget)
        );
        let (Some(from), Some(to)) = (from, to) else {
            self.stats.record_unresolved();
            warn!(
                provider = self.name(),
                failure = "unresolved_location",
                origin = %query.origin,
                destination = %query.destination,
                "Station code not found, skipping rail search"
            );
            return Vec::new();
        };

        let request = TrainSearchRequest {
            from_station: from.to_string(),
            to_station: to.to_string(),
            date: query.date,
        };
        let Some(mut trains) = absorb(
            self.name(),
            &self.stats,
            self.config.call_timeout,
            self.api.trains_between(&request),
        )
        .await
        else {
            return Vec::new();
        };

        if trains.is_empty() {
            self.stats.record_empty();
            debug!(from = %from, to = %to, "No trains found");
            return Vec::new();
        }

        // Trains known to carry the class go first; the sort is stable.
        let class_code = self.class_code(query.class_preference.as_deref());
        trains.sort_by_key(|train| !train.may_carry(&class_code));
        trains.truncate(self.config.max_trains);
        let lookups = join_all(trains.iter().map(|train| {
            let request =
                self.availability_request(&train.train_number, &class_code, query, &from, &to);
            self.availability(request)
        }))
        .await;

        trains
            .iter()
            .zip(&lookups)
            .map(|(train, lookup)| convert_train(train, lookup, query, &class_code))
            .collect()
    }
}

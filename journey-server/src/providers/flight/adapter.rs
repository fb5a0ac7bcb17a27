//! Flight adapter: location resolution + flight search + mapping.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::TransportOption;
use crate::locations::{LocationLookup, LocationResolver};
use crate::providers::{AdapterStats, LegQuery, TransportSearch, absorb};

use super::client::FlightApi;
use super::convert::{cabin_class, convert_itineraries};
use super::types::FlightSearchRequest;

/// Configuration for the flight adapter.
#[derive(Debug, Clone)]
pub struct FlightAdapterConfig {
    /// Maximum itineraries mapped per search.
    pub max_itineraries: usize,

    /// Time budget for the search call.
    pub call_timeout: Duration,
}

impl Default for FlightAdapterConfig {
    fn default() -> Self {
        Self {
            max_itineraries: 4,
            call_timeout: Duration::from_secs(8),
        }
    }
}

/// Flight provider adapter.
pub struct FlightAdapter<A, L> {
    api: A,
    airports: Arc<LocationResolver<L>>,
    config: FlightAdapterConfig,
    stats: AdapterStats,
}

impl<A: FlightApi, L: LocationLookup> FlightAdapter<A, L> {
    pub fn new(api: A, airports: Arc<LocationResolver<L>>, config: FlightAdapterConfig) -> Self {
        Self {
            api,
            airports,
            config,
            stats: AdapterStats::default(),
        }
    }

    pub fn stats(&self) -> &AdapterStats {
        &self.stats
    }

    /// Airport code for a place, or the raw place name if none resolves.
    async fn airport_code(&self, place: &str) -> String {
        match self
            .airports
            .resolve_within(place, self.config.call_timeout)
            .await
        {
            Some(code) => code.to_string(),
            None => {
                self.stats.record_unresolved();
                place.trim().to_string()
            }
        }
    }
}

impl<A: FlightApi, L: LocationLookup> TransportSearch for FlightAdapter<A, L> {
    fn name(&self) -> &'static str {
        "flight"
    }

    async fn search(&self, query: &LegQuery) -> Vec<TransportOption> {
        self.stats.record_search();

        let (origin, destination) = tokio::join!(
            self.airport_code(&query.origin),
            self.airport_code(&query.destination)
        );

        let request = FlightSearchRequest {
            origin,
            destination,
            date: query.date,
            currency: query.currency.clone(),
            cabin_class: cabin_class(query.class_preference.as_deref()),
        };

        let Some(response) = absorb(
            self.name(),
            &self.stats,
            self.config.call_timeout,
            self.api.search_flights(&request),
        )
        .await
        else {
            return Vec::new();
        };

        let options = convert_itineraries(&response, query, self.config.max_itineraries);
        if options.is_empty() {
            self.stats.record_empty();
            debug!(
                origin = %request.origin,
                destination = %request.destination,
                "No flights found"
            );
        }
        options
    }
}

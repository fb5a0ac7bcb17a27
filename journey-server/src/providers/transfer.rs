//! Local transfers within a hub city.
//!
//! Fares come from a static table keyed by city, so results are indicative
//! rather than live quotes. Callers must not rely on real-time accuracy.

use std::collections::HashMap;
use std::future::Future;

use tracing::debug;

use crate::domain::{
    Availability, TransportKind, TransportOption, TravelDuration, display_name, format_price,
    normalize_place_name, search_link,
};

use super::AdapterStats;

const UBER_URL: &str = "https://m.uber.com/ul/";
const MAPS_URL: &str = "https://www.google.com/maps/dir/";

/// A transfer between two points inside one city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferQuery {
    pub hub_city: String,
    /// Arrival terminal or place name.
    pub from_point: String,
    /// Departure terminal or place name.
    pub to_point: String,
    pub currency: String,
}

/// Source of intra-city transfer options.
pub trait LocalTransfers: Send + Sync {
    /// Options for one transfer. Never fails.
    fn transfers(&self, query: &TransferQuery)
    -> impl Future<Output = Vec<TransportOption>> + Send;
}

/// Indicative fares for crossing one city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferFare {
    /// Typical door-to-door minutes by road.
    pub minutes: u32,
    pub taxi: f64,
    pub rickshaw: f64,
    /// Metro or suburban rail connects the city's terminals.
    pub metro: bool,
}

impl Default for TransferFare {
    fn default() -> Self {
        Self {
            minutes: 45,
            taxi: 600.0,
            rickshaw: 300.0,
            metro: false,
        }
    }
}

/// Fares per city, with a default for cities not listed.
#[derive(Debug, Clone, Default)]
pub struct FareTable {
    fares: HashMap<String, TransferFare>,
    currency: String,
}

impl FareTable {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            fares: HashMap::new(),
            currency: currency.into(),
        }
    }

    pub fn add(mut self, city: &str, fare: TransferFare) -> Self {
        self.fares.insert(normalize_place_name(city), fare);
        self
    }

    /// Fare for a city; unknown cities get the default fare.
    pub fn get(&self, city: &str) -> TransferFare {
        self.fares
            .get(&normalize_place_name(city))
            .copied()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.fares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fares.is_empty()
    }
}

/// Fares for the built-in Indian hub cities, in INR.
pub fn india_fares() -> FareTable {
    let fare = |minutes, taxi, rickshaw, metro| TransferFare {
        minutes,
        taxi,
        rickshaw,
        metro,
    };
    FareTable::new("INR")
        .add("Mumbai", fare(60, 750.0, 350.0, true))
        .add("Pune", fare(35, 450.0, 220.0, true))
        .add("Ahmedabad", fare(30, 400.0, 200.0, true))
        .add("Delhi", fare(50, 650.0, 300.0, true))
        .add("Bengaluru", fare(70, 900.0, 400.0, true))
        .add("Chennai", fare(45, 550.0, 280.0, true))
        .add("Kolkata", fare(50, 500.0, 250.0, true))
        .add("Jaipur", fare(30, 350.0, 180.0, false))
}

/// Local transfer adapter over a [`FareTable`].
#[derive(Debug, Default)]
pub struct LocalTransferAdapter {
    fares: FareTable,
    stats: AdapterStats,
}

impl LocalTransferAdapter {
    pub fn new(fares: FareTable) -> Self {
        Self {
            fares,
            stats: AdapterStats::default(),
        }
    }

    pub fn stats(&self) -> &AdapterStats {
        &self.stats
    }

    fn options(&self, query: &TransferQuery) -> Vec<TransportOption> {
        let fare = self.fares.get(&query.hub_city);
        let currency = if self.fares.currency.is_empty() {
            query.currency.as_str()
        } else {
            self.fares.currency.as_str()
        };
        let from = display_name(&query.from_point);
        let to = display_name(&query.to_point);
        let city = display_name(&query.hub_city);

        let pickup = format!("{from}, {city}");
        let dropoff = format!("{to}, {city}");
        let uber = search_link(
            UBER_URL,
            &[
                ("action", "setPickup"),
                ("pickup[formatted_address]", pickup.as_str()),
                ("dropoff[formatted_address]", dropoff.as_str()),
            ],
        );

        let mut options = vec![
            transfer_option(
                "Taxi (Uber/Ola)",
                format!("Taxi from {from} to {to}"),
                fare.minutes,
                format_price(currency, fare.taxi),
                uber,
                false,
            ),
            transfer_option(
                "Auto-rickshaw",
                format!("Auto-rickshaw from {from} to {to}"),
                fare.minutes + fare.minutes / 3,
                format_price(currency, fare.rickshaw),
                maps_link(from, to, city, "driving"),
                false,
            ),
        ];

        if fare.metro {
            options.push(transfer_option(
                "Metro / suburban rail",
                format!("Metro or local train from {from} to {to}"),
                fare.minutes,
                format_price(currency, 40.0),
                maps_link(from, to, city, "transit"),
                true,
            ));
        }

        options
    }
}

impl LocalTransfers for LocalTransferAdapter {
    async fn transfers(&self, query: &TransferQuery) -> Vec<TransportOption> {
        self.stats.record_search();
        let options = self.options(query);
        debug!(
            city = %query.hub_city,
            count = options.len(),
            "Local transfer options"
        );
        options
    }
}

fn transfer_option(
    provider: &str,
    descriptor: String,
    minutes: u32,
    price: String,
    booking_link: String,
    eco_friendly: bool,
) -> TransportOption {
    TransportOption {
        kind: TransportKind::LocalTransfer,
        provider: provider.to_string(),
        descriptor,
        duration: TravelDuration::from_minutes(minutes),
        price,
        booking_link,
        eco_friendly,
        availability: Availability::NotApplicable,
        availability_note: None,
    }
}

fn maps_link(from: &str, to: &str, city: &str, mode: &str) -> String {
    let origin = format!("{from}, {city}");
    let destination = format!("{to}, {city}");
    search_link(
        MAPS_URL,
        &[
            ("api", "1"),
            ("origin", origin.as_str()),
            ("destination", destination.as_str()),
            ("travelmode", mode),
        ],
    )
}

//! Flight search API DTOs.
//!
//! These map directly to the flight search JSON payload. Every field is
//! optional because itineraries from aggregators are frequently partial.

use chrono::NaiveDate;
use serde::Deserialize;

/// Parameters for one flight search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightSearchRequest {
    /// Airport code, or the raw place name when no code was resolved.
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub currency: String,
    pub cabin_class: &'static str,
}

/// Payload of a flight search response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchResponse {
    #[serde(default)]
    pub itineraries: Vec<FlightItinerary>,
}

/// One priced itinerary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightItinerary {
    /// Marketing carrier name, e.g. "IndiGo".
    pub carrier: Option<String>,

    /// Flight number, e.g. "6E 5123".
    pub flight_number: Option<String>,

    /// Local departure time, ISO 8601 without offset.
    pub departure: Option<String>,

    /// Local arrival time, ISO 8601 without offset.
    pub arrival: Option<String>,

    /// Total travel time in minutes.
    pub duration_minutes: Option<u32>,

    /// Number of intermediate stops.
    #[serde(default)]
    pub stop_count: u32,

    pub price: Option<FlightPrice>,

    /// Deep link to the booking site.
    pub deep_link: Option<String>,
}

/// Price as reported by the flight API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPrice {
    /// Numeric amount in the requested currency.
    pub raw: Option<f64>,

    /// Display string, e.g. "₹4,520".
    pub formatted: Option<String>,
}

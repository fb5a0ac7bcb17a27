//! Data transfer objects for web requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::planner::{TravelPreferences, TripRequest};
use crate::providers::StatsSnapshot;

/// Request to resolve a journey.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveJourneyRequest {
    /// Free-text origin, e.g. "Vapi, India"
    pub origin: String,

    /// Free-text destination
    pub destination: String,

    /// Travel date (YYYY-MM-DD)
    pub date: NaiveDate,

    /// ISO currency code for prices (defaults to INR)
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Rail class code or flight cabin
    #[serde(default)]
    pub travel_class: Option<String>,

    #[serde(default)]
    pub prefer_eco_friendly: bool,
}

fn default_currency() -> String {
    "INR".to_string()
}

impl From<ResolveJourneyRequest> for TripRequest {
    fn from(req: ResolveJourneyRequest) -> Self {
        let currency = match req.currency.trim() {
            "" => default_currency(),
            c => c.to_uppercase(),
        };
        TripRequest {
            origin: req.origin,
            destination: req.destination,
            date: req.date,
            currency,
            preferences: TravelPreferences {
                travel_class: req.travel_class.filter(|c| !c.trim().is_empty()),
                prefer_eco_friendly: req.prefer_eco_friendly,
            },
        }
    }
}

/// Which code space a location lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    /// Rail station code
    Rail,
    /// Airport code
    Flight,
}

/// Query for resolving a place name to a code.
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    /// Place name
    pub q: String,

    /// Code space
    pub kind: LocationKind,
}

/// Result of a location lookup.
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub query: String,
    pub kind: LocationKind,
    /// Resolved code, or null if none was found
    pub code: Option<String>,
}

/// Request to normalize narrative collaborator output.
#[derive(Debug, Deserialize)]
pub struct NarrativeRequest {
    pub destination: String,

    /// Raw collaborator output; may be missing
    #[serde(default)]
    pub raw: Option<String>,
}

/// Adapter counters and cache sizes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub flight: StatsSnapshot,
    pub rail: StatsSnapshot,
    pub transfer: StatsSnapshot,
    pub airport_cache_entries: u64,
    pub station_cache_entries: u64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

//! Conversion from flight API DTOs to transport options.

use chrono::NaiveDateTime;

use crate::domain::{
    Availability, TransportKind, TransportOption, TravelDuration, display_name, format_price,
    sanitize_link, search_link, tag_price, unpriced,
};
use crate::providers::LegQuery;

use super::types::{FlightItinerary, FlightSearchResponse};

/// Fallback search page when an itinerary carries no deep link.
const FLIGHT_SEARCH_URL: &str = "https://www.google.com/travel/flights";

/// Map the cabin preference onto the API's cabin classes.
///
/// Anything that is not a recognised cabin (rail class codes included)
/// searches economy.
pub fn cabin_class(preference: Option<&str>) -> &'static str {
    match preference.map(|p| p.trim().to_lowercase()).as_deref() {
        Some("premium_economy" | "premium economy" | "premium") => "premium_economy",
        Some("business") => "business",
        Some("first") => "first",
        _ => "economy",
    }
}

/// Convert the first `limit` itineraries of a response.
pub fn convert_itineraries(
    response: &FlightSearchResponse,
    query: &LegQuery,
    limit: usize,
) -> Vec<TransportOption> {
    response
        .itineraries
        .iter()
        .take(limit)
        .map(|itinerary| convert_itinerary(itinerary, query))
        .collect()
}

/// Convert a single itinerary.
pub fn convert_itinerary(itinerary: &FlightItinerary, query: &LegQuery) -> TransportOption {
    let provider = itinerary
        .carrier
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| "Unknown airline".to_string());

    let duration = itinerary
        .duration_minutes
        .map(TravelDuration::from_minutes)
        .unwrap_or_else(TravelDuration::unknown);

    let price = match &itinerary.price {
        Some(p) => match (p.raw, p.formatted.as_deref()) {
            (Some(raw), _) => format_price(&query.currency, raw),
            (None, Some(formatted)) => tag_price(&query.currency, formatted),
            (None, None) => unpriced(&query.currency),
        },
        None => unpriced(&query.currency),
    };

    let booking_link = itinerary
        .deep_link
        .as_deref()
        .and_then(sanitize_link)
        .unwrap_or_else(|| fallback_link(query));

    TransportOption {
        kind: TransportKind::Flight,
        provider,
        descriptor: describe(itinerary),
        duration,
        price,
        booking_link,
        eco_friendly: false,
        availability: Availability::Available,
        availability_note: None,
    }
}

fn describe(itinerary: &FlightItinerary) -> String {
    let mut parts = Vec::new();

    let name = [itinerary.carrier.as_deref(), itinerary.flight_number.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !name.is_empty() {
        parts.push(name);
    }

    if let Some(dep) = itinerary.departure.as_deref() {
        parts.push(format!("departs {}", clock_time(dep)));
    }
    if let Some(arr) = itinerary.arrival.as_deref() {
        parts.push(format!("arrives {}", clock_time(arr)));
    }

    parts.push(match itinerary.stop_count {
        0 => "non-stop".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{n} stops"),
    });

    parts.join(", ")
}

/// "2024-03-15T06:10:00" → "06:10"; anything else is shown verbatim.
fn clock_time(raw: &str) -> String {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn fallback_link(query: &LegQuery) -> String {
    let q = format!(
        "Flights from {} to {} on {}",
        display_name(&query.origin),
        display_name(&query.destination),
        query.date.format("%Y-%m-%d")
    );
    search_link(FLIGHT_SEARCH_URL, &[("q", q.as_str())])
}

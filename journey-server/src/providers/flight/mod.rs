//! Flight search provider.
//!
//! Endpoints are resolved to airport codes first (falling back to the raw
//! place name when no code is found), then the flight search API is queried
//! and the top itineraries are mapped into transport options.

mod adapter;
mod client;
mod convert;
mod types;

pub use adapter::{FlightAdapter, FlightAdapterConfig};
pub use client::{FlightApi, FlightClient, FlightClientConfig};
pub use convert::{cabin_class, convert_itineraries, convert_itinerary};
pub use types::{FlightItinerary, FlightPrice, FlightSearchRequest, FlightSearchResponse};

//! Domain types for journey resolution.
//!
//! Everything here is a value object built fresh per request. Provider
//! payloads are mapped into these types at the adapter boundary, so the
//! planner never sees a provider-specific shape.

mod booking;
mod duration;
mod journey;
mod location;
mod option;

pub use booking::{format_price, sanitize_link, search_link, tag_price, unpriced};
pub use duration::TravelDuration;
pub use journey::{Journey, JourneyLeg};
pub use location::{
    InvalidLocationCode, LocationCode, display_name, normalize_place_name, place_qualifiers,
    same_place,
};
pub use option::{Availability, TransportKind, TransportOption};

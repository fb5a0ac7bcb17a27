//! Journey resolution.
//!
//! Given an origin, a destination and a travel date, the planner decides
//! how to get there: directly, or via an intermediate hub city. It queries
//! the rail and flight providers (rail first for domestic routes, with
//! flights added when no rail seat is confirmed), falls back to routing via
//! a hub, inserts a local transfer when the hub legs use different
//! terminals, and normalizes the result so callers always get a
//! well-formed journey.

mod assemble;
mod config;
mod direct;
mod hub;
mod hubs;
mod locale;
mod normalize;
mod rank;
mod search;

#[cfg(test)]
mod resolve_tests;

pub use assemble::{assemble, describe_leg};
pub use config::PlannerConfig;
pub use hubs::{Hub, HubStrategy, HubTable, HubTableBuilder, HubTableError, india_hubs};
pub use locale::RouteBias;
pub use normalize::{normalize, normalize_value, unresolved_journey};
pub use rank::rank_options;
pub use search::{Planner, PlannerError, TravelPreferences, TripRequest};

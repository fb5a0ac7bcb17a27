//! Location code resolution.
//!
//! Turns free-text place names ("Vapi, India") into the identifiers a
//! provider needs: airport codes for flight search, station codes for rail
//! search. Each provider gets its own resolver with its own cache.

mod client;
mod resolver;

pub use client::{LocationCandidate, LocationClient, LocationClientConfig};
pub use resolver::{LocationLookup, LocationResolver, best_match};

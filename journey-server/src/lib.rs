//! Journey resolution server.
//!
//! Answers: "how do I get from here to there on this date?" by querying
//! rail, flight and local-transfer providers, routing via a hub city when no
//! direct connection exists, and always returning a well-formed journey.

pub mod cache;
pub mod domain;
pub mod locations;
pub mod narrative;
pub mod planner;
pub mod providers;
pub mod upstream;
pub mod web;

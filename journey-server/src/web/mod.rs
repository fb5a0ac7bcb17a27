//! Web layer for the journey resolution server.
//!
//! Provides HTTP endpoints for resolving journeys and location codes.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, LiveFlightAdapter, LiveRailAdapter};

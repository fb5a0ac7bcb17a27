//! Application state for the web layer.

use std::sync::Arc;

use crate::locations::{LocationClient, LocationResolver};
use crate::planner::{HubStrategy, PlannerConfig};
use crate::providers::flight::{FlightAdapter, FlightClient};
use crate::providers::rail::{RailAdapter, RailClient};
use crate::providers::transfer::LocalTransferAdapter;

/// Flight adapter over the HTTP clients.
pub type LiveFlightAdapter = FlightAdapter<FlightClient, LocationClient>;

/// Rail adapter over the HTTP clients.
pub type LiveRailAdapter = RailAdapter<RailClient, LocationClient>;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    pub flight: Arc<LiveFlightAdapter>,
    pub rail: Arc<LiveRailAdapter>,
    pub transfers: Arc<LocalTransferAdapter>,

    /// Airport code resolver (shared with the flight adapter)
    pub airports: Arc<LocationResolver<LocationClient>>,

    /// Station code resolver (shared with the rail adapter)
    pub stations: Arc<LocationResolver<LocationClient>>,

    pub hubs: Arc<dyn HubStrategy>,
    pub config: Arc<PlannerConfig>,
}

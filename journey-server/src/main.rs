use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use journey_server::cache::CacheConfig;
use journey_server::locations::{LocationClient, LocationClientConfig, LocationResolver};
use journey_server::planner::{HubStrategy, HubTable, PlannerConfig, india_hubs};
use journey_server::providers::flight::{
    FlightAdapter, FlightAdapterConfig, FlightClient, FlightClientConfig,
};
use journey_server::providers::rail::{RailAdapter, RailAdapterConfig, RailClient, RailClientConfig};
use journey_server::providers::transfer::{LocalTransferAdapter, india_fares};
use journey_server::web::{AppState, create_router};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_FLIGHT_API_URL: &str = "https://flights.example.com/api/v1";
const DEFAULT_RAIL_API_URL: &str = "https://rail.example.com/api/v1";
const DEFAULT_AIRPORT_LOOKUP_URL: &str = "https://flights.example.com/api/v1/airports/search";
const DEFAULT_STATION_LOOKUP_URL: &str = "https://rail.example.com/api/v1/stations/search";

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn api_key(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(key) if !key.trim().is_empty() => Some(key),
        _ => {
            warn!(variable = name, "API key not set, provider will return no options");
            None
        }
    }
}

fn lookup_client(url: String, key: Option<&str>, timeout_secs: u64) -> LocationClient {
    let mut config = LocationClientConfig::new(url).with_timeout(timeout_secs);
    if let Some(key) = key {
        config = config.with_api_key(key);
    }
    LocationClient::new(config).expect("Failed to create location client")
}

fn load_hubs() -> Arc<dyn HubStrategy> {
    let Ok(path) = std::env::var("HUB_TABLE_PATH") else {
        return Arc::new(india_hubs());
    };
    let table = HubTable::load(&path).expect("Failed to load hub table");
    info!(path = %path, hubs = table.len(), "Loaded hub table");
    Arc::new(table)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("journey_server=info,tower_http=info")),
        )
        .init();

    let timeout_secs: u64 = std::env::var("PROVIDER_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    let call_timeout = Duration::from_secs(timeout_secs);

    let flight_key = api_key("FLIGHT_API_KEY");
    let rail_key = api_key("RAIL_API_KEY");

    // Location resolvers, each with its own cache
    let cache_config = CacheConfig::default();
    let airports = Arc::new(LocationResolver::new(
        lookup_client(
            env_or("AIRPORT_LOOKUP_URL", DEFAULT_AIRPORT_LOOKUP_URL),
            flight_key.as_deref(),
            timeout_secs,
        ),
        &cache_config,
        "airport",
    ));
    let stations = Arc::new(LocationResolver::new(
        lookup_client(
            env_or("STATION_LOOKUP_URL", DEFAULT_STATION_LOOKUP_URL),
            rail_key.as_deref(),
            timeout_secs,
        ),
        &cache_config,
        "station",
    ));

    // Provider clients and adapters
    let mut flight_config = FlightClientConfig::new(env_or("FLIGHT_API_URL", DEFAULT_FLIGHT_API_URL))
        .with_timeout(timeout_secs);
    if let Some(key) = flight_key {
        flight_config = flight_config.with_api_key(key);
    }
    let flight_client = FlightClient::new(flight_config).expect("Failed to create flight client");

    let mut rail_config = RailClientConfig::new(env_or("RAIL_API_URL", DEFAULT_RAIL_API_URL))
        .with_timeout(timeout_secs);
    if let Some(key) = rail_key {
        rail_config = rail_config.with_api_key(key);
    }
    let rail_client = RailClient::new(rail_config).expect("Failed to create rail client");

    let flight = FlightAdapter::new(
        flight_client,
        airports.clone(),
        FlightAdapterConfig {
            call_timeout,
            ..FlightAdapterConfig::default()
        },
    );
    let rail = RailAdapter::new(
        rail_client,
        stations.clone(),
        RailAdapterConfig {
            call_timeout,
            ..RailAdapterConfig::default()
        },
    );

    let planner_config = PlannerConfig::default().with_call_timeout(call_timeout);

    let state = AppState {
        flight: Arc::new(flight),
        rail: Arc::new(rail),
        transfers: Arc::new(LocalTransferAdapter::new(india_fares())),
        airports,
        stations,
        hubs: load_hubs(),
        config: Arc::new(planner_config),
    };

    let app = create_router(state);

    let addr: SocketAddr = env_or("JOURNEY_BIND_ADDR", DEFAULT_BIND_ADDR)
        .parse()
        .expect("Invalid JOURNEY_BIND_ADDR");
    info!(%addr, "Journey server listening");
    info!("  GET  /health              - Health check");
    info!("  POST /journey/resolve     - Resolve a journey");
    info!("  GET  /locations/resolve   - Resolve a place to a station or airport code");
    info!("  POST /narrative/normalize - Normalize itinerary narrative output");
    info!("  GET  /stats               - Adapter counters");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}

//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::Journey;
use crate::narrative::{NarrativeItinerary, normalize_narrative};
use crate::planner::{Planner, TripRequest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/journey/resolve", post(resolve_journey))
        .route("/locations/resolve", get(resolve_location))
        .route("/narrative/normalize", post(normalize_itinerary))
        .route("/stats", get(stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Resolve a journey.
///
/// Always answers with a well-formed journey; a trip that cannot be
/// resolved comes back as a single leg with no options.
async fn resolve_journey(
    State(state): State<AppState>,
    Json(req): Json<ResolveJourneyRequest>,
) -> Json<Journey> {
    let trip = TripRequest::from(req);
    let planner = Planner::new(
        &*state.flight,
        &*state.rail,
        &*state.transfers,
        &*state.hubs,
        &state.config,
    );
    Json(planner.resolve(&trip).await)
}

/// Resolve a place name to a station or airport code.
async fn resolve_location(
    State(state): State<AppState>,
    Query(req): Query<LocationQuery>,
) -> Result<Json<LocationResponse>, AppError> {
    if req.q.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "Query parameter 'q' is empty".to_string(),
        });
    }

    let code = match req.kind {
        LocationKind::Rail => state.stations.resolve(&req.q).await,
        LocationKind::Flight => state.airports.resolve(&req.q).await,
    };

    Ok(Json(LocationResponse {
        query: req.q,
        kind: req.kind,
        code: code.map(|c| c.to_string()),
    }))
}

/// Normalize itinerary text from the narrative collaborator.
async fn normalize_itinerary(Json(req): Json<NarrativeRequest>) -> Json<NarrativeItinerary> {
    Json(normalize_narrative(req.raw.as_deref(), &req.destination))
}

/// Adapter counters and cache sizes.
async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        flight: state.flight.stats().snapshot(),
        rail: state.rail.stats().snapshot(),
        transfer: state.transfers.stats().snapshot(),
        airport_cache_entries: state.airports.cache_entry_count(),
        station_cache_entries: state.stations.cache_entry_count(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        warn!(status = %status, error = %message, "Request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use tower::ServiceExt;

    use crate::cache::CacheConfig;
    use crate::locations::{LocationClient, LocationClientConfig, LocationResolver};
    use crate::planner::{PlannerConfig, india_hubs};
    use crate::providers::flight::{FlightAdapter, FlightAdapterConfig, FlightClient, FlightClientConfig};
    use crate::providers::rail::{RailAdapter, RailAdapterConfig, RailClient, RailClientConfig};
    use crate::providers::transfer::{LocalTransferAdapter, india_fares};

    /// State whose upstreams are all unreachable or unconfigured.
    fn offline_state() -> AppState {
        let lookup = || {
            LocationClient::new(LocationClientConfig::new("http://127.0.0.1:9/search").with_timeout(1))
                .unwrap()
        };
        let airports = Arc::new(LocationResolver::new(lookup(), &CacheConfig::default(), "airport"));
        let stations = Arc::new(LocationResolver::new(lookup(), &CacheConfig::default(), "station"));

        let flight = FlightAdapter::new(
            FlightClient::new(FlightClientConfig::new("http://127.0.0.1:9")).unwrap(),
            airports.clone(),
            FlightAdapterConfig::default(),
        );
        let rail = RailAdapter::new(
            RailClient::new(RailClientConfig::new("http://127.0.0.1:9")).unwrap(),
            stations.clone(),
            RailAdapterConfig::default(),
        );

        AppState {
            flight: Arc::new(flight),
            rail: Arc::new(rail),
            transfers: Arc::new(LocalTransferAdapter::new(india_fares())),
            airports,
            stations,
            hubs: Arc::new(india_hubs()),
            config: Arc::new(PlannerConfig::default()),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_ok() {
        let app = create_router(offline_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn resolve_degrades_to_empty_journey() {
        let app = create_router(offline_state());
        let request = Request::post("/journey/resolve")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"origin": "Vapi, India", "destination": "Pune, India", "date": "2024-03-15"}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let legs = json["legs"].as_array().unwrap();
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0]["sequence"], 1);
        assert_eq!(legs[0]["options"], serde_json::json!([]));
        assert_eq!(
            legs[0]["description"],
            "No transport options found from Vapi to Pune"
        );
    }

    #[tokio::test]
    async fn empty_location_query_is_bad_request() {
        let app = create_router(offline_state());
        let response = app
            .oneshot(
                Request::get("/locations/resolve?q=%20&kind=rail")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn narrative_substitutes_minimal_itinerary() {
        let app = create_router(offline_state());
        let request = Request::post("/narrative/normalize")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"destination": "Pune, India", "raw": "not json"}"#))
            .unwrap();

        let json = body_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(json["days"][0]["title"], "Arrive in Pune");
    }

    #[tokio::test]
    async fn stats_report_counters() {
        let app = create_router(offline_state());
        let response = app
            .oneshot(Request::get("/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["flight"]["searches"], 0);
        assert_eq!(json["stationCacheEntries"], 0);
    }
}

//! Scenario tests for journey resolution with mock providers.

use super::*;
use crate::domain::{
    Availability, Journey, TransportKind, TransportOption, TravelDuration, normalize_place_name,
};
use crate::providers::transfer::{LocalTransferAdapter, india_fares};
use crate::providers::{LegQuery, TransportSearch};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn date() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn option(kind: TransportKind, availability: Availability, minutes: u32) -> TransportOption {
    TransportOption {
        kind,
        provider: kind.label().to_string(),
        descriptor: format!("{} {minutes}", kind.label()),
        duration: TravelDuration::from_minutes(minutes),
        price: "INR 500".into(),
        booking_link: "https://example.com/book".into(),
        eco_friendly: kind.is_eco_friendly(),
        availability,
        availability_note: None,
    }
}

fn train(availability: Availability) -> TransportOption {
    option(TransportKind::Train, availability, 170)
}

fn flight() -> TransportOption {
    option(TransportKind::Flight, Availability::Available, 55)
}

/// Mock provider with canned options per (origin, destination).
struct MockProvider {
    name: &'static str,
    routes: HashMap<(String, String), Vec<TransportOption>>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockProvider {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            routes: HashMap::new(),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn route(mut self, from: &str, to: &str, options: Vec<TransportOption>) -> Self {
        self.routes.insert(
            (normalize_place_name(from), normalize_place_name(to)),
            options,
        );
        self
    }

    fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn was_called_for(&self, from: &str, to: &str) -> bool {
        let key = (normalize_place_name(from), normalize_place_name(to));
        self.calls.lock().unwrap().contains(&key)
    }
}

impl TransportSearch for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(&self, query: &LegQuery) -> Vec<TransportOption> {
        let key = (
            normalize_place_name(&query.origin),
            normalize_place_name(&query.destination),
        );
        self.calls.lock().unwrap().push(key.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.routes.get(&key).cloned().unwrap_or_default()
    }
}

/// Hub strategy that counts how often it is consulted.
struct CountingHubs {
    inner: HubTable,
    calls: AtomicUsize,
}

impl CountingHubs {
    fn india() -> Self {
        Self {
            inner: india_hubs(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl HubStrategy for CountingHubs {
    fn candidates(&self, origin: &str, destination: &str) -> Vec<Hub> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.candidates(origin, destination)
    }
}

struct Fixture {
    flight: MockProvider,
    rail: MockProvider,
    transfers: LocalTransferAdapter,
    hubs: CountingHubs,
    config: PlannerConfig,
}

impl Fixture {
    fn new(flight: MockProvider, rail: MockProvider) -> Self {
        Self {
            flight,
            rail,
            transfers: LocalTransferAdapter::new(india_fares()),
            hubs: CountingHubs::india(),
            config: PlannerConfig::default(),
        }
    }

    fn planner(&self) -> Planner<'_, MockProvider, MockProvider, LocalTransferAdapter> {
        Planner::new(
            &self.flight,
            &self.rail,
            &self.transfers,
            &self.hubs,
            &self.config,
        )
    }

    async fn resolve(&self, origin: &str, destination: &str) -> Journey {
        let request = TripRequest::new(origin, destination, date(), "INR");
        self.planner().resolve(&request).await
    }
}

fn assert_sequenced(journey: &Journey) {
    for (i, leg) in journey.legs.iter().enumerate() {
        assert_eq!(leg.sequence as usize, i + 1);
    }
}

#[tokio::test]
async fn available_rail_skips_flights() {
    let rail = MockProvider::new("rail").route(
        "Vapi, India",
        "Mumbai, India",
        vec![train(Availability::Available), train(Availability::Waitlisted)],
    );
    let flight = MockProvider::new("flight").route("Vapi, India", "Mumbai, India", vec![flight()]);
    let fx = Fixture::new(flight, rail);

    let journey = fx.resolve("Vapi, India", "Mumbai, India").await;

    assert_eq!(journey.leg_count(), 1);
    assert_eq!(journey.legs[0].options.len(), 2);
    assert_eq!(journey.legs[0].description, "Train from Vapi to Mumbai");
    assert_eq!(fx.flight.call_count(), 0);
}

#[tokio::test]
async fn waitlisted_rail_adds_flights() {
    let rail = MockProvider::new("rail").route(
        "Vapi, India",
        "Mumbai, India",
        vec![train(Availability::Waitlisted), train(Availability::SoldOut)],
    );
    let flight = MockProvider::new("flight").route("Vapi, India", "Mumbai, India", vec![flight()]);
    let fx = Fixture::new(flight, rail);

    let journey = fx.resolve("Vapi, India", "Mumbai, India").await;

    assert_eq!(fx.flight.call_count(), 1);
    let kinds: Vec<_> = journey.legs[0].options.iter().map(|o| o.kind).collect();
    assert_eq!(kinds, vec![TransportKind::Flight, TransportKind::Train]);
    assert_eq!(journey.legs[0].description, "Flight or train from Vapi to Mumbai");
}

#[tokio::test]
async fn unknown_rail_availability_adds_flights() {
    let rail = MockProvider::new("rail").route(
        "Vapi, India",
        "Mumbai, India",
        vec![train(Availability::Unknown)],
    );
    let fx = Fixture::new(MockProvider::new("flight"), rail);

    let journey = fx.resolve("Vapi, India", "Mumbai, India").await;

    assert_eq!(fx.flight.call_count(), 1);
    assert_eq!(journey.legs[0].options.len(), 1);
}

#[tokio::test]
async fn sold_out_never_reaches_output() {
    let rail = MockProvider::new("rail")
        .route(
            "Vapi, India",
            "Mumbai, India",
            vec![train(Availability::SoldOut), train(Availability::Waitlisted)],
        )
        .route("Mumbai, India", "Pune, India", vec![train(Availability::SoldOut)]);
    let flight = MockProvider::new("flight").route("Mumbai, India", "Pune, India", vec![flight()]);
    let fx = Fixture::new(flight, rail);

    let journey = fx.resolve("Vapi, India", "Pune, India").await;

    assert!(journey.leg_count() >= 2);
    assert!(
        journey
            .options()
            .all(|o| o.availability != Availability::SoldOut)
    );
}

#[tokio::test]
async fn flight_biased_route_skips_rail() {
    let flight = MockProvider::new("flight").route("Paris, France", "Berlin, Germany", vec![flight()]);
    let fx = Fixture::new(flight, MockProvider::new("rail"));

    let journey = fx.resolve("Paris, France", "Berlin, Germany").await;

    assert_eq!(journey.legs[0].description, "Flight from Paris to Berlin");
    assert_eq!(fx.rail.call_count(), 0);
}

#[tokio::test]
async fn nothing_found_escalates_to_hub_once() {
    let fx = Fixture::new(MockProvider::new("flight"), MockProvider::new("rail"));

    let journey = fx.resolve("Vapi, India", "Pune, India").await;

    assert_eq!(fx.hubs.calls.load(Ordering::SeqCst), 1);
    assert_eq!(journey.leg_count(), 1);
    assert_eq!(journey.legs[0].sequence, 1);
    assert!(journey.legs[0].options.is_empty());
    assert_eq!(
        journey.legs[0].description,
        "No transport options found from Vapi to Pune"
    );
}

#[tokio::test]
async fn direct_success_never_consults_hubs() {
    let rail = MockProvider::new("rail").route(
        "Vapi, India",
        "Pune, India",
        vec![train(Availability::Available)],
    );
    let fx = Fixture::new(MockProvider::new("flight"), rail);

    fx.resolve("Vapi, India", "Pune, India").await;

    assert_eq!(fx.hubs.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn vapi_to_pune_via_mumbai_by_rail() {
    let rail = MockProvider::new("rail")
        .route("Vapi, India", "Mumbai, India", vec![train(Availability::Available)])
        .route("Mumbai, India", "Pune, India", vec![train(Availability::Available)]);
    let fx = Fixture::new(MockProvider::new("flight"), rail);

    let journey = fx.resolve("Vapi, India", "Pune, India").await;

    assert_eq!(journey.leg_count(), 2);
    assert_sequenced(&journey);
    assert!(journey.legs[0].description.contains("Mumbai"));
    assert_eq!(journey.legs[0].description, "Train from Vapi to Mumbai");
    assert_eq!(journey.legs[1].description, "Train from Mumbai to Pune");
    assert!(fx.rail.was_called_for("Vapi, India", "Mumbai, India"));
    assert!(fx.rail.was_called_for("Mumbai, India", "Pune, India"));
}

#[tokio::test]
async fn vapi_to_pune_with_airport_transfer() {
    let rail = MockProvider::new("rail").route(
        "Vapi, India",
        "Mumbai, India",
        vec![train(Availability::Available)],
    );
    let flight = MockProvider::new("flight").route("Mumbai, India", "Pune, India", vec![flight()]);
    let fx = Fixture::new(flight, rail);

    let journey = fx.resolve("Vapi, India", "Pune, India").await;

    assert_eq!(journey.leg_count(), 3);
    assert_sequenced(&journey);
    assert!(journey.legs[0].description.contains("Mumbai"));
    assert_eq!(
        journey.legs[1].description,
        "Transfer within Mumbai from Mumbai Central to Mumbai Airport (BOM)"
    );
    assert!(
        journey.legs[1]
            .options
            .iter()
            .all(|o| o.kind == TransportKind::LocalTransfer)
    );
    assert_eq!(journey.legs[2].primary_kind(), Some(TransportKind::Flight));
    assert_eq!(fx.transfers.stats().snapshot().searches, 1);
}

#[tokio::test]
async fn hub_reached_without_onward_options_is_partial() {
    let rail = MockProvider::new("rail").route(
        "Vapi, India",
        "Mumbai, India",
        vec![train(Availability::Available)],
    );
    let fx = Fixture::new(MockProvider::new("flight"), rail);

    let journey = fx.resolve("Vapi, India", "Pune, India").await;

    assert_eq!(journey.leg_count(), 2);
    assert_sequenced(&journey);
    assert!(journey.legs[0].has_options());
    assert!(!journey.legs[1].has_options());
    assert_eq!(
        journey.legs[1].description,
        "No transport options found from Mumbai to Pune"
    );
}

#[tokio::test]
async fn second_hub_tried_when_first_unreachable() {
    let rail = MockProvider::new("rail")
        .route("Pune, India", "Lonavala, India", vec![train(Availability::Available)])
        .route("Vapi, India", "Pune, India", vec![train(Availability::Available)]);
    let fx = Fixture::new(MockProvider::new("flight"), rail);

    let journey = fx.resolve("Vapi, India", "Lonavala, India").await;

    assert_eq!(journey.leg_count(), 2);
    assert_eq!(journey.legs[0].description, "Train from Vapi to Pune");
    assert!(fx.rail.was_called_for("Vapi, India", "Mumbai, India"));
}

#[tokio::test]
async fn invalid_request_is_normalized_without_searching() {
    let fx = Fixture::new(MockProvider::new("flight"), MockProvider::new("rail"));

    let journey = fx.resolve("Pune, India", "pune").await;

    assert_eq!(journey.leg_count(), 1);
    assert!(journey.is_empty());
    assert_eq!(fx.rail.call_count() + fx.flight.call_count(), 0);
}

#[tokio::test]
async fn try_resolve_reports_invalid_request() {
    let fx = Fixture::new(MockProvider::new("flight"), MockProvider::new("rail"));
    let request = TripRequest::new("", "Pune", date(), "INR");

    let result = fx.planner().try_resolve(&request).await;
    assert!(matches!(result, Err(PlannerError::InvalidRequest(_))));
}

#[tokio::test]
async fn slow_provider_is_cut_off() {
    let rail = MockProvider::new("rail")
        .route("Vapi, India", "Mumbai, India", vec![train(Availability::Available)])
        .slow(Duration::from_secs(30));
    let flight = MockProvider::new("flight").route("Vapi, India", "Mumbai, India", vec![flight()]);
    let mut fx = Fixture::new(flight, rail);
    fx.config = PlannerConfig::default().with_leg_timeout(Duration::from_millis(50));

    let journey = fx.resolve("Vapi, India", "Mumbai, India").await;

    assert_eq!(journey.leg_count(), 1);
    assert_eq!(journey.legs[0].primary_kind(), Some(TransportKind::Flight));
}

#[tokio::test]
async fn eco_preference_puts_rail_first() {
    let rail = MockProvider::new("rail").route(
        "Vapi, India",
        "Mumbai, India",
        vec![train(Availability::Waitlisted)],
    );
    let flight = MockProvider::new("flight").route("Vapi, India", "Mumbai, India", vec![flight()]);
    let fx = Fixture::new(flight, rail);

    let mut request = TripRequest::new("Vapi, India", "Mumbai, India", date(), "INR");
    request.preferences.prefer_eco_friendly = true;
    let journey = fx.planner().resolve(&request).await;

    // Availability still outranks eco preference.
    assert_eq!(journey.legs[0].primary_kind(), Some(TransportKind::Flight));

    let rail = MockProvider::new("rail").route(
        "Vapi, India",
        "Mumbai, India",
        vec![option(TransportKind::Train, Availability::Waitlisted, 170)],
    );
    let flight = MockProvider::new("flight").route(
        "Vapi, India",
        "Mumbai, India",
        vec![option(TransportKind::Flight, Availability::Waitlisted, 55)],
    );
    let fx = Fixture::new(flight, rail);
    let journey = fx.planner().resolve(&request).await;
    assert_eq!(journey.legs[0].primary_kind(), Some(TransportKind::Train));
}

//! Journey resolution entry point.
//!
//! Tries a direct route first and falls back to routing via a hub. Whatever
//! happens, [`Planner::resolve`] returns a well-formed [`Journey`].

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::domain::{Journey, TransportOption, same_place};
use crate::providers::transfer::{LocalTransfers, TransferQuery};
use crate::providers::{LegQuery, TransportSearch};

use super::config::PlannerConfig;
use super::hubs::HubStrategy;
use super::normalize::normalize;

/// Error from journey resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlannerError {
    /// Invalid trip request
    #[error("invalid trip request: {0}")]
    InvalidRequest(String),
}

/// What the traveler asked for beyond the endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TravelPreferences {
    /// Class code ("SL", "3A") or cabin ("economy", "business").
    pub travel_class: Option<String>,

    /// Rank eco-friendly options first.
    pub prefer_eco_friendly: bool,
}

/// Request to resolve a journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    /// ISO currency code for prices.
    pub currency: String,
    pub preferences: TravelPreferences,
}

impl TripRequest {
    /// Create a request with default preferences.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        date: NaiveDate,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            date,
            currency: currency.into(),
            preferences: TravelPreferences::default(),
        }
    }

    /// Validate the trip request.
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.origin.trim().is_empty() {
            return Err(PlannerError::InvalidRequest("origin is empty".to_string()));
        }
        if self.destination.trim().is_empty() {
            return Err(PlannerError::InvalidRequest(
                "destination is empty".to_string(),
            ));
        }
        if same_place(&self.origin, &self.destination) {
            return Err(PlannerError::InvalidRequest(
                "origin and destination are the same place".to_string(),
            ));
        }
        Ok(())
    }

    /// Provider query for one leg of this trip.
    pub fn leg(&self, from: &str, to: &str) -> LegQuery {
        LegQuery {
            origin: from.to_string(),
            destination: to.to_string(),
            date: self.date,
            currency: self.currency.clone(),
            class_preference: self.preferences.travel_class.clone(),
        }
    }
}

/// Journey resolver over a flight provider, a rail provider, a local
/// transfer source and a hub strategy.
pub struct Planner<'a, F, R, T> {
    pub(super) flight: &'a F,
    pub(super) rail: &'a R,
    pub(super) transfers: &'a T,
    pub(super) hubs: &'a dyn HubStrategy,
    pub(super) config: &'a PlannerConfig,
}

impl<'a, F, R, T> Planner<'a, F, R, T>
where
    F: TransportSearch,
    R: TransportSearch,
    T: LocalTransfers,
{
    /// Create a new planner.
    pub fn new(
        flight: &'a F,
        rail: &'a R,
        transfers: &'a T,
        hubs: &'a dyn HubStrategy,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            flight,
            rail,
            transfers,
            hubs,
            config,
        }
    }

    /// Resolve a journey. Never fails: a trip that cannot be resolved yields
    /// a single leg with no options.
    pub async fn resolve(&self, request: &TripRequest) -> Journey {
        let result = self.try_resolve(request).await;
        normalize(result, &request.origin, &request.destination)
    }

    /// Resolve a journey, reporting an invalid request or total failure
    /// (`Ok(None)`) to the caller.
    pub async fn try_resolve(&self, request: &TripRequest) -> Result<Option<Journey>, PlannerError> {
        request.validate()?;

        let query = request.leg(&request.origin, &request.destination);
        let direct = self.direct_leg(&query, &request.preferences).await;
        if direct.has_options() {
            info!(
                origin = %request.origin,
                destination = %request.destination,
                options = direct.options.len(),
                "Resolved direct route"
            );
            return Ok(Some(Journey::direct(direct)));
        }

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            "No direct options, trying hubs"
        );
        Ok(self.via_hub(request).await)
    }

    /// Run one provider search under the leg time budget.
    pub(super) async fn timed_search<P: TransportSearch>(
        &self,
        provider: &P,
        query: &LegQuery,
    ) -> Vec<TransportOption> {
        self.within_budget(provider.name(), provider.search(query))
            .await
    }

    /// Fetch local transfer options under the leg time budget.
    pub(super) async fn timed_transfers(&self, query: &TransferQuery) -> Vec<TransportOption> {
        self.within_budget("transfer", self.transfers.transfers(query))
            .await
    }

    async fn within_budget(
        &self,
        provider: &'static str,
        search: impl Future<Output = Vec<TransportOption>>,
    ) -> Vec<TransportOption> {
        let budget: Duration = self.config.leg_timeout;
        match tokio::time::timeout(budget, search).await {
            Ok(options) => options,
            Err(_) => {
                warn!(
                    provider,
                    failure = "timeout",
                    budget_ms = budget.as_millis() as u64,
                    "Provider search exceeded leg budget"
                );
                Vec::new()
            }
        }
    }
}

//! Hub fallback: route via an intermediate city when no direct option exists.

use tracing::{debug, info};

use crate::domain::{Journey, JourneyLeg};
use crate::providers::TransportSearch;
use crate::providers::transfer::{LocalTransfers, TransferQuery};

use super::assemble::{assemble, transfer_leg, transfer_points};
use super::hubs::Hub;
use super::search::{Planner, TripRequest};

impl<F, R, T> Planner<'_, F, R, T>
where
    F: TransportSearch,
    R: TransportSearch,
    T: LocalTransfers,
{
    /// Route via a hub.
    ///
    /// Candidate hubs are tried in order. The two legs of each attempt are
    /// searched concurrently. A hub whose first leg finds nothing is skipped;
    /// the first hub with both legs covered wins, otherwise the first hub
    /// that at least reaches the hub. `None` means no hub was reachable.
    pub(super) async fn via_hub(&self, request: &TripRequest) -> Option<Journey> {
        let candidates = self.hubs.candidates(&request.origin, &request.destination);
        if candidates.is_empty() {
            debug!(
                origin = %request.origin,
                destination = %request.destination,
                "No hub candidates"
            );
            return None;
        }

        let mut partial = None;
        for hub in &candidates {
            let to_hub = request.leg(&request.origin, &hub.city);
            let from_hub = request.leg(&hub.city, &request.destination);

            let (first, second) = tokio::join!(
                self.direct_leg(&to_hub, &request.preferences),
                self.direct_leg(&from_hub, &request.preferences)
            );

            if !first.has_options() {
                debug!(hub = %hub.city, "Hub not reachable from origin");
                continue;
            }

            let complete = second.has_options();
            let transfer = self
                .hub_transfer(hub, &first, &second, &request.currency)
                .await;
            let journey = assemble(first, transfer, second);

            if complete {
                info!(
                    hub = %hub.city,
                    legs = journey.leg_count(),
                    "Resolved route via hub"
                );
                return Some(journey);
            }

            debug!(hub = %hub.city, "Hub reached but no onward options");
            partial.get_or_insert(journey);
        }

        partial
    }

    /// Transfer leg within the hub, when the two legs use different terminals.
    async fn hub_transfer(
        &self,
        hub: &Hub,
        inbound: &JourneyLeg,
        outbound: &JourneyLeg,
        currency: &str,
    ) -> Option<JourneyLeg> {
        let (from_point, to_point) = transfer_points(hub, inbound, outbound)?;
        let query = TransferQuery {
            hub_city: hub.city.clone(),
            from_point,
            to_point,
            currency: currency.to_string(),
        };
        let options = self.timed_transfers(&query).await;
        Some(transfer_leg(&query, options))
    }
}

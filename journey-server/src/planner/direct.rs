//! Direct route search for one origin/destination pair.

use tracing::debug;

use crate::domain::{JourneyLeg, TransportOption};
use crate::providers::transfer::LocalTransfers;
use crate::providers::{LegQuery, TransportSearch};

use super::assemble::describe_leg;
use super::locale::RouteBias;
use super::rank::rank_options;
use super::search::{Planner, TravelPreferences};

impl<F, R, T> Planner<'_, F, R, T>
where
    F: TransportSearch,
    R: TransportSearch,
    T: LocalTransfers,
{
    /// Search one leg with the provider its locale favours.
    ///
    /// Rail-biased routes add flights when no rail option is confirmed
    /// available. Sold-out options are dropped. The leg may come back with
    /// no options, but is always returned.
    pub(super) async fn direct_leg(
        &self,
        query: &LegQuery,
        preferences: &TravelPreferences,
    ) -> JourneyLeg {
        let bias = RouteBias::classify(&query.origin, &query.destination, self.config);

        let mut options = match bias {
            RouteBias::Rail => {
                let mut options = self.timed_search(self.rail, query).await;
                if !options.iter().any(|o| o.availability.is_available()) {
                    debug!(
                        origin = %query.origin,
                        destination = %query.destination,
                        rail_options = options.len(),
                        "No available rail option, adding flights"
                    );
                    options.extend(self.timed_search(self.flight, query).await);
                }
                options
            }
            RouteBias::Flight => self.timed_search(self.flight, query).await,
        };

        options.retain(TransportOption::is_viable);
        if self.config.rank_options {
            rank_options(&mut options, preferences.prefer_eco_friendly);
        }

        let description = describe_leg(&options, &query.origin, &query.destination);
        JourneyLeg::new(1, description, options)
    }
}

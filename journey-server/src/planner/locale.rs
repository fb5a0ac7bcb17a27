//! Route classification: which provider a route is searched with first.

use crate::domain::place_qualifiers;

use super::config::PlannerConfig;

/// Which provider a route is searched with first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteBias {
    /// Domestic rail network: rail first, flights only as a fallback.
    Rail,
    /// Flights only.
    Flight,
}

impl RouteBias {
    /// Rail-biased if any comma-separated part of either endpoint is a
    /// configured rail locale ("Vapi, Gujarat, India" matches on "vapi"
    /// or "india").
    pub fn classify(origin: &str, destination: &str, config: &PlannerConfig) -> Self {
        let rail = [origin, destination]
            .into_iter()
            .flat_map(place_qualifiers)
            .any(|q| config.is_rail_locale(&q));
        if rail { RouteBias::Rail } else { RouteBias::Flight }
    }
}

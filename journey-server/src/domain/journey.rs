//! Journey types.
//!
//! A `Journey` is the resolved output handed to callers: an ordered list of
//! legs, each with the transport options that can cover it. A direct trip has
//! one leg; a hub-routed trip has two or three.

use serde::{Deserialize, Serialize};

use super::{TransportKind, TransportOption};

/// One ordered segment of a journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyLeg {
    /// 1-based position within the journey.
    pub sequence: u32,

    /// Summary such as "Train from Vapi to Mumbai".
    pub description: String,

    /// Candidate options, best first. Empty only in a degraded result.
    #[serde(default)]
    pub options: Vec<TransportOption>,
}

impl JourneyLeg {
    pub fn new(
        sequence: u32,
        description: impl Into<String>,
        options: Vec<TransportOption>,
    ) -> Self {
        Self {
            sequence,
            description: description.into(),
            options,
        }
    }

    /// Returns true if the leg has at least one option.
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Kind of the best-ranked option, if any.
    pub fn primary_kind(&self) -> Option<TransportKind> {
        self.options.first().map(|o| o.kind)
    }

    /// Drop options that cannot complete an itinerary (sold out).
    pub fn retain_viable(&mut self) {
        self.options.retain(TransportOption::is_viable);
    }
}

/// A resolved journey: legs in travel order.
///
/// # Invariants
///
/// Journeys built through [`Journey::from_legs`] have `legs[i].sequence == i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    #[serde(default)]
    pub legs: Vec<JourneyLeg>,
}

impl Journey {
    /// Construct a journey from legs in travel order, numbering them 1..N.
    pub fn from_legs(legs: Vec<JourneyLeg>) -> Self {
        let mut journey = Self { legs };
        journey.renumber();
        journey
    }

    /// A single-leg journey.
    pub fn direct(leg: JourneyLeg) -> Self {
        Self::from_legs(vec![leg])
    }

    /// Reassign sequence numbers to match leg order.
    pub fn renumber(&mut self) {
        for (i, leg) in self.legs.iter_mut().enumerate() {
            leg.sequence = (i + 1) as u32;
        }
    }

    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Returns true if this journey goes through a hub.
    pub fn is_multi_leg(&self) -> bool {
        self.legs.len() > 1
    }

    /// Returns true if no leg has any option.
    pub fn is_empty(&self) -> bool {
        self.legs.iter().all(|leg| leg.options.is_empty())
    }

    /// Iterate every option across all legs.
    pub fn options(&self) -> impl Iterator<Item = &TransportOption> {
        self.legs.iter().flat_map(|leg| leg.options.iter())
    }
}

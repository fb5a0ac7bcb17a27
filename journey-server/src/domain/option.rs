//! Transport options: a single bookable candidate for one leg.

use serde::{Deserialize, Serialize};

use super::TravelDuration;

/// Mode of transport for an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportKind {
    Flight,
    Train,
    Bus,
    Driving,
    /// Taxi, rickshaw, metro or walk within a single city.
    LocalTransfer,
}

impl TransportKind {
    /// Heuristic eco rating used when a provider does not declare one.
    pub fn is_eco_friendly(self) -> bool {
        matches!(self, TransportKind::Train | TransportKind::Bus)
    }

    /// Short human-readable label ("Train", "Flight", ...).
    pub fn label(self) -> &'static str {
        match self {
            TransportKind::Flight => "Flight",
            TransportKind::Train => "Train",
            TransportKind::Bus => "Bus",
            TransportKind::Driving => "Drive",
            TransportKind::LocalTransfer => "Local transfer",
        }
    }
}

/// Provider-reported booking feasibility.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    Available,
    Waitlisted,
    SoldOut,
    #[default]
    Unknown,
    NotApplicable,
}

impl Availability {
    /// Whether an option with this status can be used to complete an itinerary.
    ///
    /// Only sold-out options are excluded; waitlisted and unknown remain viable.
    pub fn is_viable(self) -> bool {
        self != Availability::SoldOut
    }

    /// Whether a seat is confirmed bookable right now.
    pub fn is_available(self) -> bool {
        self == Availability::Available
    }

    /// Sort rank: lower is better.
    pub fn rank(self) -> u8 {
        match self {
            Availability::Available => 0,
            Availability::Waitlisted => 1,
            Availability::Unknown => 2,
            Availability::NotApplicable => 3,
            Availability::SoldOut => 4,
        }
    }
}

/// A single bookable leg candidate, normalized from any provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportOption {
    pub kind: TransportKind,

    /// Carrier or operator name.
    pub provider: String,

    /// Human-readable detail (times, train number, ...).
    pub descriptor: String,

    #[serde(flatten)]
    pub duration: TravelDuration,

    /// Currency-prefixed price, e.g. "INR 1,245".
    pub price: String,

    /// Percent-encoded absolute URL of a third-party booking page.
    pub booking_link: String,

    pub eco_friendly: bool,

    #[serde(default)]
    pub availability: Availability,

    /// Raw provider status text behind `availability`, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_note: Option<String>,
}

impl TransportOption {
    /// Whether this option may appear in an assembled leg.
    pub fn is_viable(&self) -> bool {
        self.availability.is_viable()
    }
}

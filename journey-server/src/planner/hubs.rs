//! Transport hubs for routes with no direct connection.
//!
//! Small places rarely have direct trains or flights to each other, but
//! their nearest major city usually does. A hub table maps minor places to
//! that city along with its main rail terminal and airport, so a trip can be
//! split into origin→hub and hub→destination.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{TransportKind, normalize_place_name, same_place};

/// A major city used as an intermediate stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hub {
    /// Place name used for searches, e.g. "Mumbai, India".
    pub city: String,

    /// Main rail terminal, e.g. "Mumbai Central".
    #[serde(default)]
    pub rail_terminal: Option<String>,

    /// Main airport.
    #[serde(default)]
    pub airport: Option<String>,
}

impl Hub {
    /// Where within the hub a leg of this kind arrives or departs.
    pub fn terminal_for(&self, kind: TransportKind) -> Option<&str> {
        match kind {
            TransportKind::Train | TransportKind::Bus => self.rail_terminal.as_deref(),
            TransportKind::Flight => self.airport.as_deref(),
            TransportKind::Driving | TransportKind::LocalTransfer => None,
        }
    }
}

/// Chooses candidate hubs for a route.
///
/// This abstraction allows a caller to inject another hub source (for
/// example a geocoding service) in place of the static table.
pub trait HubStrategy: Send + Sync {
    /// Hubs to try, best first. Never includes either endpoint.
    fn candidates(&self, origin: &str, destination: &str) -> Vec<Hub>;
}

/// Error loading a hub table file.
#[derive(Debug, thiserror::Error)]
pub enum HubTableError {
    #[error("failed to read hub table: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid hub table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Hub file entry: a hub plus the places it serves.
#[derive(Debug, Deserialize)]
struct HubEntry {
    #[serde(flatten)]
    hub: Hub,

    #[serde(default)]
    serves: Vec<String>,
}

/// Static table of places → nearest hub.
///
/// Each hub also serves its own city name.
#[derive(Debug, Clone, Default)]
pub struct HubTable {
    hubs: Vec<Hub>,
    /// Normalized place name → index into `hubs`.
    served: HashMap<String, usize>,
}

impl HubTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hub and the places it serves.
    pub fn add<S: AsRef<str>>(&mut self, hub: Hub, serves: &[S]) {
        let idx = self.hubs.len();
        self.served.insert(normalize_place_name(&hub.city), idx);
        for place in serves {
            let key = normalize_place_name(place.as_ref());
            if !key.is_empty() {
                self.served.insert(key, idx);
            }
        }
        self.hubs.push(hub);
    }

    /// The hub serving a place, if any.
    pub fn hub_for(&self, place: &str) -> Option<&Hub> {
        self.served
            .get(&normalize_place_name(place))
            .map(|&idx| &self.hubs[idx])
    }

    /// Number of hubs.
    pub fn len(&self) -> usize {
        self.hubs.len()
    }

    /// Returns true if there are no hubs.
    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty()
    }

    /// Parse a JSON array of `{city, railTerminal?, airport?, serves[]}`.
    pub fn from_json(json: &str) -> Result<Self, HubTableError> {
        let entries: Vec<HubEntry> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for entry in entries {
            table.add(entry.hub, &entry.serves);
        }
        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HubTableError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl HubStrategy for HubTable {
    fn candidates(&self, origin: &str, destination: &str) -> Vec<Hub> {
        let mut hubs: Vec<Hub> = Vec::new();
        for place in [origin, destination] {
            let Some(hub) = self.hub_for(place) else {
                continue;
            };
            let is_endpoint = same_place(&hub.city, origin) || same_place(&hub.city, destination);
            if !is_endpoint && !hubs.iter().any(|h| h.city == hub.city) {
                hubs.push(hub.clone());
            }
        }
        hubs
    }
}

/// Builder for creating hub tables.
#[derive(Debug, Default)]
pub struct HubTableBuilder {
    inner: HubTable,
}

impl HubTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hub with its rail terminal, airport and served places.
    pub fn hub(mut self, city: &str, rail_terminal: &str, airport: &str, serves: &[&str]) -> Self {
        let hub = Hub {
            city: city.to_string(),
            rail_terminal: Some(rail_terminal.to_string()),
            airport: Some(airport.to_string()),
        };
        self.inner.add(hub, serves);
        self
    }

    pub fn build(self) -> HubTable {
        self.inner
    }
}

/// Built-in hubs for India.
pub fn india_hubs() -> HubTable {
    HubTableBuilder::new()
        .hub(
            "Mumbai, India",
            "Mumbai Central",
            "Mumbai Airport (BOM)",
            &["vapi", "valsad", "daman", "silvassa", "surat", "thane", "kalyan", "alibaug", "navi mumbai"],
        )
        .hub(
            "Pune, India",
            "Pune Junction",
            "Pune Airport (PNQ)",
            &["lonavala", "satara", "baramati", "mahabaleshwar", "lavasa"],
        )
        .hub(
            "Ahmedabad, India",
            "Ahmedabad Junction",
            "Ahmedabad Airport (AMD)",
            &["vadodara", "anand", "nadiad", "gandhinagar", "bharuch"],
        )
        .hub(
            "Delhi, India",
            "New Delhi",
            "Delhi Airport (DEL)",
            &["noida", "gurugram", "gurgaon", "faridabad", "ghaziabad", "agra", "mathura"],
        )
        .hub(
            "Bengaluru, India",
            "KSR Bengaluru",
            "Bengaluru Airport (BLR)",
            &["mysuru", "mysore", "hosur", "coorg", "tumakuru"],
        )
        .hub(
            "Chennai, India",
            "Chennai Central",
            "Chennai Airport (MAA)",
            &["puducherry", "pondicherry", "vellore", "kanchipuram", "mahabalipuram"],
        )
        .hub(
            "Kolkata, India",
            "Howrah Junction",
            "Kolkata Airport (CCU)",
            &["howrah", "digha", "shantiniketan", "kharagpur"],
        )
        .hub(
            "Jaipur, India",
            "Jaipur Junction",
            "Jaipur Airport (JAI)",
            &["ajmer", "pushkar", "alwar", "sikar"],
        )
        .build()
}

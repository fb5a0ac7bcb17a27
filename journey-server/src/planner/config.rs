//! Configuration for the journey planner.

use std::time::Duration;

/// Places whose routes are searched rail-first.
const DEFAULT_RAIL_LOCALES: &[&str] = &[
    "india",
    "bharat",
    "mumbai",
    "new delhi",
    "delhi",
    "pune",
    "ahmedabad",
    "vapi",
    "surat",
    "vadodara",
    "bengaluru",
    "bangalore",
    "chennai",
    "kolkata",
    "hyderabad",
    "jaipur",
    "lucknow",
    "nashik",
    "lonavala",
];

/// Sequential upstream rounds in the slowest adapter search: location
/// lookup, train search, then the availability fan-out.
const SEQUENTIAL_ROUNDS: u32 = 3;

/// Configuration parameters for journey resolution.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Lowercase country and city names that make a route rail-biased.
    pub rail_locales: Vec<String>,

    /// Upper bound on one adapter search, on top of each adapter's own
    /// per-call timeouts.
    pub leg_timeout: Duration,

    /// Sort each leg's options best-first.
    pub rank_options: bool,
}

impl PlannerConfig {
    /// Returns true if `qualifier` (already lowercased) is a rail locale.
    pub fn is_rail_locale(&self, qualifier: &str) -> bool {
        self.rail_locales.iter().any(|l| l == qualifier)
    }

    pub fn with_leg_timeout(mut self, timeout: Duration) -> Self {
        self.leg_timeout = timeout;
        self
    }

    /// Set the leg budget from the adapters' per-call timeout, leaving one
    /// round of slack past the slowest search so the per-call timeouts fire
    /// first and degraded rows survive.
    pub fn with_call_timeout(self, call_timeout: Duration) -> Self {
        self.with_leg_timeout(call_timeout * (SEQUENTIAL_ROUNDS + 1))
    }

    pub fn with_rail_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rail_locales = locales
            .into_iter()
            .map(|l| l.as_ref().trim().to_lowercase())
            .collect();
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            rail_locales: DEFAULT_RAIL_LOCALES.iter().map(|s| s.to_string()).collect(),
            leg_timeout: Duration::from_secs(20),
            rank_options: true,
        }
    }
}

//! Output normalization.
//!
//! Whatever the resolution pipeline produced (a journey, nothing, an error,
//! or a loosely-shaped JSON value), callers receive a well-formed [`Journey`]:
//! at least one leg, every leg with an options list, sequences 1..N, and no
//! sold-out options.

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{Journey, JourneyLeg, TransportOption};

use super::assemble::no_options_description;
use super::search::PlannerError;

/// The journey returned when nothing could be resolved: one leg, no options.
pub fn unresolved_journey(origin: &str, destination: &str) -> Journey {
    Journey::direct(JourneyLeg::new(
        1,
        no_options_description(origin, destination),
        Vec::new(),
    ))
}

/// Normalize a resolution result.
pub fn normalize(
    result: Result<Option<Journey>, PlannerError>,
    origin: &str,
    destination: &str,
) -> Journey {
    match result {
        Ok(Some(journey)) => tidy(journey, origin, destination),
        Ok(None) => {
            debug!(origin, destination, "No route resolved");
            unresolved_journey(origin, destination)
        }
        Err(e) => {
            warn!(origin, destination, error = %e, "Journey resolution failed");
            unresolved_journey(origin, destination)
        }
    }
}

/// Normalize a journey given as untyped JSON.
///
/// Accepts partial shapes: missing `legs` or `options`, malformed options
/// (skipped), missing descriptions (filled in).
pub fn normalize_value(value: Option<&Value>, origin: &str, destination: &str) -> Journey {
    let Some(value) = value else {
        return unresolved_journey(origin, destination);
    };

    let legs = value
        .get("legs")
        .and_then(Value::as_array)
        .map(|legs| legs.iter().filter_map(|leg| lenient_leg(leg, origin, destination)).collect())
        .unwrap_or_default();

    tidy(Journey { legs }, origin, destination)
}

fn lenient_leg(value: &Value, origin: &str, destination: &str) -> Option<JourneyLeg> {
    let object = value.as_object()?;

    let description = object
        .get("description")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Travel from {origin} to {destination}"));

    let options = object
        .get("options")
        .and_then(Value::as_array)
        .map(|options| {
            options
                .iter()
                .filter_map(|o| serde_json::from_value::<TransportOption>(o.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    Some(JourneyLeg::new(0, description, options))
}

/// Drop sold-out options and renumber; an optionless journey becomes the
/// unresolved journey.
fn tidy(mut journey: Journey, origin: &str, destination: &str) -> Journey {
    for leg in &mut journey.legs {
        leg.retain_viable();
    }
    if journey.is_empty() {
        return unresolved_journey(origin, destination);
    }
    journey.renumber();
    journey
}

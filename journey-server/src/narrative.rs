//! Contract with the itinerary narrative collaborator.
//!
//! A text-generation service turns a resolved journey into a day-by-day
//! itinerary. Its output arrives as loosely formatted JSON, often wrapped in
//! a Markdown code fence, and is sometimes missing or malformed. This
//! module defines the expected shape and substitutes a minimal itinerary
//! when the output cannot be used.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::display_name;

/// A day-by-day itinerary for a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeItinerary {
    pub destination: String,
    #[serde(default)]
    pub days: Vec<ItineraryDay>,
}

/// One day of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub day: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

impl NarrativeItinerary {
    /// The itinerary used when the collaborator's output is unusable.
    pub fn minimal(destination: &str) -> Self {
        let place = display_name(destination);
        Self {
            destination: destination.to_string(),
            days: vec![ItineraryDay {
                day: 1,
                title: format!("Arrive in {place}"),
                activities: vec![
                    format!("Travel to {place}"),
                    "Check in and rest".to_string(),
                    format!("Explore {place}"),
                ],
            }],
        }
    }
}

/// Parse collaborator output, substituting [`NarrativeItinerary::minimal`]
/// when it is missing, malformed, or has no days.
///
/// ```
/// use journey_server::narrative::normalize_narrative;
///
/// let itinerary = normalize_narrative(None, "Pune, India");
/// assert_eq!(itinerary.days[0].title, "Arrive in Pune");
/// ```
pub fn normalize_narrative(raw: Option<&str>, destination: &str) -> NarrativeItinerary {
    let Some(raw) = raw.map(strip_code_fence).filter(|r| !r.is_empty()) else {
        warn!(destination, "Empty narrative output, using minimal itinerary");
        return NarrativeItinerary::minimal(destination);
    };

    match serde_json::from_str::<NarrativeItinerary>(raw) {
        Ok(mut itinerary) if !itinerary.days.is_empty() => {
            if itinerary.destination.trim().is_empty() {
                itinerary.destination = destination.to_string();
            }
            for (i, day) in itinerary.days.iter_mut().enumerate() {
                day.day = (i + 1) as u32;
            }
            itinerary
        }
        Ok(_) => {
            warn!(destination, "Narrative output has no days, using minimal itinerary");
            NarrativeItinerary::minimal(destination)
        }
        Err(e) => {
            warn!(destination, error = %e, "Malformed narrative output, using minimal itinerary");
            NarrativeItinerary::minimal(destination)
        }
    }
}

/// Remove a surrounding ```json ... ``` fence.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // Drop the language tag on the opening line.
    match inner.split_once('\n') {
        Some((tag, body)) if !tag.trim().contains('{') => body.trim(),
        _ => inner.trim(),
    }
}

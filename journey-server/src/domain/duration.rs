//! Travel durations.
//!
//! Providers report durations as free text ("02:53", "1h 15m", "45m").
//! The text is kept verbatim for display, alongside a parsed minute count
//! used for ranking.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A provider-reported travel duration.
///
/// # Examples
///
/// ```
/// use journey_server::domain::TravelDuration;
///
/// let d = TravelDuration::from_minutes(135);
/// assert_eq!(d.text(), "2h 15m");
///
/// let d = TravelDuration::parse("02:53");
/// assert_eq!(d.minutes(), Some(173));
///
/// let d = TravelDuration::parse("about an hour");
/// assert_eq!(d.minutes(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelDuration {
    #[serde(rename = "duration")]
    text: String,

    #[serde(
        rename = "durationMinutes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    minutes: Option<u32>,
}

impl TravelDuration {
    /// Build from a whole number of minutes, formatted as `"{h}h {m}m"`.
    pub fn from_minutes(minutes: u32) -> Self {
        Self {
            text: format!("{}h {}m", minutes / 60, minutes % 60),
            minutes: Some(minutes),
        }
    }

    /// Keep provider text as-is and try to read a minute count from it.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        Self {
            text: text.to_string(),
            minutes: parse_minutes(text),
        }
    }

    /// A duration the provider did not report.
    pub fn unknown() -> Self {
        Self {
            text: "unknown".to_string(),
            minutes: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn minutes(&self) -> Option<u32> {
        self.minutes
    }
}

impl fmt::Display for TravelDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Parse "HH:MM" or unit forms like "2h 5m", "2 hrs 5 mins", "45m".
fn parse_minutes(text: &str) -> Option<u32> {
    if text.is_empty() {
        return None;
    }

    if let Some((hours, mins)) = text.split_once(':') {
        let hours: u32 = hours.trim().parse().ok()?;
        let mins: u32 = mins.trim().parse().ok()?;
        if mins > 59 {
            return None;
        }
        return hours.checked_mul(60)?.checked_add(mins);
    }

    let mut total: u32 = 0;
    let mut saw_unit = false;
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut digits = String::new();
        while let Some(&d) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            digits.push(d);
            chars.next();
        }
        if digits.is_empty() {
            return None;
        }
        let value: u32 = digits.parse().ok()?;

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let mut unit = String::new();
        while let Some(&u) = chars.peek() {
            if !u.is_ascii_alphabetic() {
                break;
            }
            unit.push(u.to_ascii_lowercase());
            chars.next();
        }

        let scale = match unit.as_str() {
            "h" | "hr" | "hrs" | "hour" | "hours" => 60,
            "m" | "min" | "mins" | "minute" | "minutes" => 1,
            _ => return None,
        };
        total = total.checked_add(value.checked_mul(scale)?)?;
        saw_unit = true;
    }

    saw_unit.then_some(total)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Formatted durations are always readable back to the same minute count.
        #[test]
        fn formatted_text_parses_back(mins in 0u32..100_000) {
            let d = TravelDuration::from_minutes(mins);
            prop_assert_eq!(parse_minutes(d.text()), Some(mins));
        }

        /// Parsing never panics on arbitrary input.
        #[test]
        fn parse_is_total(s in ".{0,24}") {
            let _ = TravelDuration::parse(&s);
        }
    }
}

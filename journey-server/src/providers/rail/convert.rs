//! Conversion from rail API DTOs to transport options.

use crate::domain::{
    Availability, TransportKind, TransportOption, TravelDuration, display_name, format_price,
    search_link, unpriced,
};
use crate::providers::LegQuery;

use super::types::{AvailabilityRow, RawTrain};

/// Operator named on every rail option.
const RAIL_OPERATOR: &str = "Indian Railways";

/// Booking search page for rail tickets.
const RAIL_BOOKING_URL: &str = "https://www.irctc.co.in/nget/train-search";

/// Outcome of the per-train seat-availability call.
#[derive(Debug, Clone)]
pub enum AvailabilityLookup {
    /// The call succeeded; rows may be empty.
    Rows(Vec<AvailabilityRow>),
    /// The call failed or timed out.
    Failed,
}

/// Classify a raw seat-availability status.
///
/// Sold-out markers are checked first, since "NOT AVAILABLE" would
/// otherwise read as available.
///
/// ```
/// use journey_server::domain::Availability;
/// use journey_server::providers::rail::parse_availability_status;
///
/// assert_eq!(parse_availability_status("AVAILABLE-0042"), Availability::Available);
/// assert_eq!(parse_availability_status("GNWL 12/WL 8"), Availability::Waitlisted);
/// assert_eq!(parse_availability_status("REGRET"), Availability::SoldOut);
/// assert_eq!(parse_availability_status("???"), Availability::Unknown);
/// ```
pub fn parse_availability_status(status: &str) -> Availability {
    let status = status.trim().to_uppercase();
    if status.is_empty() {
        return Availability::Unknown;
    }

    const SOLD_OUT: [&str; 4] = ["REGRET", "NOT AVAILABLE", "TRAIN CANCELLED", "DEPARTED"];
    if SOLD_OUT.iter().any(|marker| status.contains(marker)) {
        return Availability::SoldOut;
    }

    if ["AVAILABLE", "AVL", "CURR_AVBL"]
        .iter()
        .any(|prefix| status.starts_with(prefix))
    {
        return Availability::Available;
    }

    const WAITLIST: [&str; 7] = ["WL", "GNWL", "RLWL", "PQWL", "RSWL", "TQWL", "RAC"];
    let waitlisted = status
        .split(|c: char| !c.is_ascii_alphanumeric())
        .map(|token| token.trim_end_matches(|c: char| c.is_ascii_digit()))
        .any(|token| WAITLIST.contains(&token));
    if waitlisted {
        return Availability::Waitlisted;
    }

    Availability::Unknown
}

/// Convert one train and its availability lookup into an option.
pub fn convert_train(
    train: &RawTrain,
    lookup: &AvailabilityLookup,
    query: &LegQuery,
    class_code: &str,
) -> TransportOption {
    let (availability, note, row_fare) = match lookup {
        AvailabilityLookup::Failed => (Availability::Unknown, "Error".to_string(), None),
        AvailabilityLookup::Rows(rows) => match rows.first() {
            None => (Availability::Unknown, "Not Available".to_string(), None),
            Some(row) => {
                let status = row.current_status.as_deref().unwrap_or("").trim();
                let note = if status.is_empty() {
                    "Not Available".to_string()
                } else {
                    status.to_string()
                };
                (parse_availability_status(status), note, row.total_fare)
            }
        },
    };

    let fare = train
        .fares
        .as_ref()
        .and_then(|fares| fares.get(class_code).copied())
        .or(row_fare);
    let price = match fare {
        Some(amount) => format_price(&query.currency, amount),
        None => unpriced(&query.currency),
    };

    let duration = train
        .duration
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(TravelDuration::parse)
        .unwrap_or_else(TravelDuration::unknown);

    TransportOption {
        kind: TransportKind::Train,
        provider: RAIL_OPERATOR.to_string(),
        descriptor: describe(train, class_code),
        duration,
        price,
        booking_link: booking_link(train, query, class_code),
        eco_friendly: true,
        availability,
        availability_note: Some(note),
    }
}

fn describe(train: &RawTrain, class_code: &str) -> String {
    let mut parts = Vec::new();

    let name = match train.train_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => format!("{} {}", train.train_number, name),
        _ => train.train_number.clone(),
    };
    parts.push(name);

    if let Some(dep) = train.from_std.as_deref() {
        parts.push(format!("departs {}", dep.trim()));
    }
    if let Some(arr) = train.to_sta.as_deref() {
        parts.push(format!("arrives {}", arr.trim()));
    }
    parts.push(format!("class {class_code}"));

    parts.join(", ")
}

fn booking_link(train: &RawTrain, query: &LegQuery, class_code: &str) -> String {
    let date = query.date.format("%d-%m-%Y").to_string();
    search_link(
        RAIL_BOOKING_URL,
        &[
            ("trainNo", train.train_number.as_str()),
            ("from", display_name(&query.origin)),
            ("to", display_name(&query.destination)),
            ("date", date.as_str()),
            ("class", class_code),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use chrono::NaiveDate;

    fn query() -> LegQuery {
        LegQuery {
            origin: "Vapi, India".into(),
            destination: "Mumbai Central, India".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            currency: "INR".into(),
            class_preference: None,
        }
    }

    fn train() -> RawTrain {
        RawTrain {
            train_number: "12933".into(),
            train_name: Some("KARNAVATI EXP".into()),
            from_std: Some("06:22".into()),
            to_sta: Some("09:15".into()),
            duration: Some("02:53".into()),
            class_type: vec!["SL".into(), "CC".into()],
            fares: Some(HashMap::from([("SL".to_string(), 180.0)])),
        }
    }

    fn row(status: &str) -> AvailabilityRow {
        AvailabilityRow {
            current_status: Some(status.into()),
            total_fare: Some(200.0),
        }
    }

    #[test]
    fn status_available() {
        for s in ["AVAILABLE-0042", "AVL 12", "CURR_AVBL-0012", "available"] {
            assert_eq!(parse_availability_status(s), Availability::Available, "{s}");
        }
    }

    #[test]
    fn status_waitlisted() {
        for s in ["GNWL 12/WL 8", "RLWL5", "RAC 3", "PQWL12/PQWL4", "wl 2"] {
            assert_eq!(parse_availability_status(s), Availability::Waitlisted, "{s}");
        }
    }

    #[test]
    fn status_sold_out() {
        for s in ["REGRET/WL", "NOT AVAILABLE", "Train Cancelled", "DEPARTED"] {
            assert_eq!(parse_availability_status(s), Availability::SoldOut, "{s}");
        }
    }

    #[test]
    fn status_unknown() {
        for s in ["", "  ", "CHART PREPARED", "WLAN"] {
            assert_eq!(parse_availability_status(s), Availability::Unknown, "{s}");
        }
    }

    #[test]
    fn converts_available_train() {
        let lookup = AvailabilityLookup::Rows(vec![row("AVAILABLE-0042")]);
        let option = convert_train(&train(), &lookup, &query(), "SL");

        assert_eq!(option.kind, TransportKind::Train);
        assert_eq!(option.provider, "Indian Railways");
        assert_eq!(
            option.descriptor,
            "12933 KARNAVATI EXP, departs 06:22, arrives 09:15, class SL"
        );
        assert_eq!(option.duration.minutes(), Some(173));
        assert_eq!(option.price, "INR 180");
        assert!(option.eco_friendly);
        assert_eq!(option.availability, Availability::Available);
        assert_eq!(option.availability_note.as_deref(), Some("AVAILABLE-0042"));
    }

    #[test]
    fn booking_link_is_encoded() {
        let lookup = AvailabilityLookup::Rows(vec![row("AVAILABLE-0042")]);
        let option = convert_train(&train(), &lookup, &query(), "SL");

        assert!(option.booking_link.starts_with(RAIL_BOOKING_URL));
        assert!(option.booking_link.contains("trainNo=12933"));
        assert!(!option.booking_link.contains(' '));
    }

    #[test]
    fn no_rows_is_not_available() {
        let option = convert_train(&train(), &AvailabilityLookup::Rows(vec![]), &query(), "SL");
        assert_eq!(option.availability, Availability::Unknown);
        assert_eq!(option.availability_note.as_deref(), Some("Not Available"));
    }

    #[test]
    fn failed_lookup_keeps_train() {
        let option = convert_train(&train(), &AvailabilityLookup::Failed, &query(), "SL");
        assert_eq!(option.availability, Availability::Unknown);
        assert_eq!(option.availability_note.as_deref(), Some("Error"));
        assert_eq!(option.price, "INR 180");
    }

    #[test]
    fn fare_falls_back_to_availability_row() {
        let lookup = AvailabilityLookup::Rows(vec![row("GNWL 12/WL 8")]);
        let option = convert_train(&train(), &lookup, &query(), "3A");
        assert_eq!(option.price, "INR 200");
        assert_eq!(option.availability, Availability::Waitlisted);
    }

    #[test]
    fn sparse_train() {
        let bare = RawTrain {
            train_number: "19015".into(),
            ..RawTrain::default()
        };
        let option = convert_train(&bare, &AvailabilityLookup::Failed, &query(), "SL");
        assert_eq!(option.descriptor, "19015, class SL");
        assert_eq!(option.duration.minutes(), None);
        assert_eq!(option.price, "INR n/a");
    }
}

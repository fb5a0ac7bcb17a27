//! Leg descriptions and multi-leg assembly.

use crate::domain::{Journey, JourneyLeg, TransportKind, TransportOption, display_name, same_place};
use crate::providers::transfer::TransferQuery;

use super::hubs::Hub;

/// Summary of a searched leg, e.g. "Train from Vapi to Mumbai" or
/// "Train or flight from Mumbai to Pune".
pub fn describe_leg(options: &[TransportOption], from: &str, to: &str) -> String {
    let from = display_name(from);
    let to = display_name(to);

    let mut kinds: Vec<TransportKind> = Vec::new();
    for option in options {
        if !kinds.contains(&option.kind) {
            kinds.push(option.kind);
        }
    }

    match kinds.split_first() {
        None => no_options_description(from, to),
        Some((first, rest)) => {
            let mut label = first.label().to_string();
            for kind in rest {
                label.push_str(" or ");
                label.push_str(&kind.label().to_lowercase());
            }
            format!("{label} from {from} to {to}")
        }
    }
}

/// Description of a leg that found nothing.
pub fn no_options_description(from: &str, to: &str) -> String {
    format!(
        "No transport options found from {} to {}",
        display_name(from),
        display_name(to)
    )
}

/// Terminals to cross within a hub, if the leg into it and the leg out of it
/// use different ones (e.g. arrive by train, leave by plane).
pub fn transfer_points(hub: &Hub, inbound: &JourneyLeg, outbound: &JourneyLeg) -> Option<(String, String)> {
    let arrival = hub.terminal_for(inbound.primary_kind()?)?;
    let departure = hub.terminal_for(outbound.primary_kind()?)?;
    if same_place(arrival, departure) {
        return None;
    }
    Some((arrival.to_string(), departure.to_string()))
}

/// The middle leg for a transfer within a hub.
pub fn transfer_leg(query: &TransferQuery, options: Vec<TransportOption>) -> JourneyLeg {
    let description = format!(
        "Transfer within {} from {} to {}",
        display_name(&query.hub_city),
        query.from_point,
        query.to_point
    );
    JourneyLeg::new(0, description, options)
}

/// Compose hub legs in travel order and number them 1..N.
pub fn assemble(first: JourneyLeg, transfer: Option<JourneyLeg>, second: JourneyLeg) -> Journey {
    let legs = std::iter::once(first)
        .chain(transfer)
        .chain(std::iter::once(second))
        .collect();
    Journey::from_legs(legs)
}

//! Option ranking within a leg.
//!
//! Orders options to present the most useful first.

use std::cmp::Ordering;

use crate::domain::TransportOption;

/// Rank options by preference, in place.
///
/// Options are ranked by:
/// 1. Availability (available, waitlisted, unknown, not applicable, sold out)
/// 2. Eco-friendly first, when `prefer_eco` is set
/// 3. Parsed duration (shorter first, unknown last)
///
/// The sort is stable, so provider order breaks remaining ties.
pub fn rank_options(options: &mut [TransportOption], prefer_eco: bool) {
    options.sort_by(|a, b| {
        a.availability
            .rank()
            .cmp(&b.availability.rank())
            .then_with(|| {
                if prefer_eco {
                    b.eco_friendly.cmp(&a.eco_friendly)
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| duration_key(a).cmp(&duration_key(b)))
    });
}

/// Unknown durations sort after every known one.
fn duration_key(option: &TransportOption) -> (bool, u32) {
    match option.duration.minutes() {
        Some(m) => (false, m),
        None => (true, 0),
    }
}

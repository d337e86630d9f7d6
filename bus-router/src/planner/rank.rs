//! Itinerary deduplication and ranking.

use std::collections::HashSet;

use super::ranked::RankedResultSet;
use crate::domain::{Criterion, Itinerary};

/// Bit pattern used to compare distances for equality.
///
/// `-0.0` and `0.0` collapse to the same key.
fn distance_key(distance: f64) -> u64 {
    (distance + 0.0).to_bits()
}

/// Remove itineraries that are operationally identical.
///
/// Two passes, each keeping the first itinerary seen per key and
/// preserving order:
/// 1. same services (number and direction) and same distance
/// 2. same distance and same path
///
/// The result is stable under a second application.
pub fn deduplicate(itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    let mut seen = HashSet::new();
    let by_services: Vec<Itinerary> = itineraries
        .into_iter()
        .filter(|it| seen.insert((it.services().to_vec(), distance_key(it.distance()))))
        .collect();

    let mut seen = HashSet::new();
    by_services
        .into_iter()
        .filter(|it| seen.insert((distance_key(it.distance()), it.path().clone())))
        .collect()
}

/// Rank itineraries ascending by `criterion`, ties in input order.
pub fn rank_itineraries(
    itineraries: impl IntoIterator<Item = Itinerary>,
    criterion: Criterion,
) -> RankedResultSet<Itinerary> {
    let mut ranked = RankedResultSet::new(criterion);
    ranked.extend(itineraries);
    ranked
}

//! # Best-Set Selection
//!
//! Ranking is a stable sort on the target's quality: beacons with equal
//! metrics keep the order they were retrieved in, so successive rounds do
//! not flip between equally ranked beacons.

use crate::domain::{InterfaceGroup, Target};
use shared_types::{Beacon, IA};

/// Stable-sorts `beacons` best first and keeps at most `n`.
pub fn rank_and_truncate(target: &Target, beacons: Vec<Beacon>, n: usize) -> Vec<Beacon> {
    let mut ranked: Vec<(f64, Beacon)> = beacons
        .into_iter()
        .map(|beacon| (target.metric(&beacon), beacon))
        .collect();
    ranked.sort_by(|(a, _), (b, _)| target.compare(*a, *b));
    ranked.truncate(n);
    ranked.into_iter().map(|(_, beacon)| beacon).collect()
}

/// Filters fetched candidates for one ingress group and keeps the `n` best.
///
/// A candidate survives if it entered through `ingress`, would not loop when
/// sent to `exclude_looping`, and `target` considers it.
pub fn select_n_best(
    target: &Target,
    candidates: Vec<Beacon>,
    ingress: &InterfaceGroup,
    exclude_looping: &IA,
    n: usize,
) -> Vec<Beacon> {
    let eligible = candidates
        .into_iter()
        .filter(|beacon| ingress.contains(beacon.in_if_id))
        .filter(|beacon| !beacon.would_loop(exclude_looping))
        .filter(|beacon| target.should_consider(beacon))
        .collect();
    rank_and_truncate(target, eligible, n)
}

//! Nearest-candidate selection by great-circle distance.

use crate::haversine;
use crate::location::{AsLocation, GeoPoint};

/// Returns the candidate closest to `origin` together with its distance
/// in meters.
///
/// Ties go to the candidate that comes first in `candidates`. Returns
/// [`None`] when there are no candidates.
pub fn nearest<'a, T: AsLocation>(origin: &GeoPoint, candidates: &'a [T]) -> Option<(&'a T, f64)> {
    let mut best: Option<(&T, f64)> = None;
    for candidate in candidates {
        let d = haversine::distance(origin, candidate.position());
        debug!("candidate at {:?}: {} m", candidate.position(), d);
        match best {
            Some((_, best_distance)) if d >= best_distance => {}
            _ => best = Some((candidate, d)),
        }
    }
    best
}

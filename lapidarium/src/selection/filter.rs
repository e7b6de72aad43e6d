//! Spatial containment filter over a place snapshot.

use crate::coord::BoundingBox;
use crate::index::PlaceSnapshot;
use crate::place::Place;

/// Return the places inside the box, visible layers only.
///
/// Containment is the inclusive flat lat/lon test of
/// [`BoundingBox::contains`]; a degenerate box matches exactly the places
/// sitting on it. Output order follows snapshot iteration order (layers by
/// key, places in load order), so repeated queries over the same snapshot
/// are deterministic. The snapshot is read-only here — visibility decisions
/// use the flags captured at snapshot time, not the live index.
pub fn places_within(snapshot: &PlaceSnapshot, bounds: &BoundingBox) -> Vec<Place> {
    let matched: Vec<Place> = snapshot
        .iter()
        .filter(|(place, visible)| *visible && bounds.contains(&place.position))
        .map(|(place, _)| place.clone())
        .collect();

    tracing::debug!(
        bounds = %bounds,
        candidates = snapshot.total_places(),
        matched = matched.len(),
        "Containment filter"
    );
    matched
}

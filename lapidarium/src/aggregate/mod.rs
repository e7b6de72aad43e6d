//! Inscription count aggregation for a selection.
//!
//! The [`InscriptionAggregator`] turns a filtered place list into a
//! [`SelectionResult`]: one batched lookup for all ids, missing ids
//! defaulted to zero, per-place rows in input order plus a grand total.
//! It is a pure async transform — no retry, no caching; a failed lookup
//! fails the whole aggregation and the caller decides how to surface it.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::place::Place;
use crate::sparql::{CountProvider, LookupError};

/// Per-place row of a selection result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceCountSummary {
    /// Stable place id.
    pub place_id: String,
    /// Display name, carried through for the result panel.
    pub place_name: String,
    /// Inscription count (zero when the store had no data).
    pub count: u64,
}

/// Final value handed to the display layer.
///
/// Built once per selection and treated as read-only by consumers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionResult {
    /// Sum of all per-place counts, defaulted zeros included.
    pub total_count: u64,
    /// One row per selected place, in selection order.
    pub places: Vec<PlaceCountSummary>,
}

/// Reduces a selected place list to counts via the external collaborator.
pub struct InscriptionAggregator<P: CountProvider> {
    provider: P,
}

impl<P: CountProvider> InscriptionAggregator<P> {
    /// Create an aggregator over a count provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The underlying provider, for the non-batched single-place flow.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Aggregate inscription counts for the given places.
    ///
    /// An empty input resolves immediately to an empty zero-count result
    /// without touching the provider. Otherwise exactly one batched lookup
    /// is issued — duplicate ids (a place sitting on several selected
    /// layers) are sent once and each occurrence gets the same count.
    pub async fn aggregate(&self, places: &[Place]) -> Result<SelectionResult, LookupError> {
        if places.is_empty() {
            debug!("Empty selection, skipping lookup");
            return Ok(SelectionResult::default());
        }

        let mut ids: Vec<String> = Vec::with_capacity(places.len());
        for place in places {
            if !ids.contains(&place.id) {
                ids.push(place.id.clone());
            }
        }

        let counts = self.provider.lookup_counts(&ids).await?;
        let by_id: HashMap<&str, u64> = counts
            .iter()
            .map(|row| (row.place_id.as_str(), row.count))
            .collect();

        let rows: Vec<PlaceCountSummary> = places
            .iter()
            .map(|place| PlaceCountSummary {
                place_id: place.id.clone(),
                place_name: place.name.clone(),
                count: by_id.get(place.id.as_str()).copied().unwrap_or(0),
            })
            .collect();
        let total_count = rows.iter().map(|row| row.count).sum();

        info!(
            places = rows.len(),
            total_count, "Aggregated inscription counts"
        );
        Ok(SelectionResult {
            total_count,
            places: rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::GeoPoint;
    use crate::sparql::PlaceCount;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock provider with canned counts and an invocation counter.
    struct MockCountProvider {
        counts: Vec<PlaceCount>,
        fail: Option<LookupError>,
        calls: AtomicUsize,
        last_ids: Mutex<Vec<String>>,
    }

    impl MockCountProvider {
        fn with_counts(counts: Vec<(&str, u64)>) -> Self {
            Self {
                counts: counts
                    .into_iter()
                    .map(|(id, count)| PlaceCount {
                        place_id: id.to_string(),
                        count,
                    })
                    .collect(),
                fail: None,
                calls: AtomicUsize::new(0),
                last_ids: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: LookupError) -> Self {
            Self {
                counts: Vec::new(),
                fail: Some(error),
                calls: AtomicUsize::new(0),
                last_ids: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CountProvider for MockCountProvider {
        async fn lookup_count(
            &self,
            _place_id: &str,
            _location_id: Option<&str>,
        ) -> Result<u64, LookupError> {
            unimplemented!("aggregation never uses the single-place path")
        }

        async fn lookup_counts(&self, place_ids: &[String]) -> Result<Vec<PlaceCount>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_ids.lock().unwrap() = place_ids.to_vec();
            match &self.fail {
                Some(error) => Err(error.clone()),
                None => Ok(self.counts.clone()),
            }
        }
    }

    fn place(id: &str, name: &str, layer: &str) -> Place {
        Place::new(id, name, GeoPoint::new(0.0, 0.0).unwrap(), layer)
    }

    #[tokio::test]
    async fn test_empty_input_skips_lookup() {
        let aggregator = InscriptionAggregator::new(MockCountProvider::with_counts(vec![]));

        let result = aggregator.aggregate(&[]).await.unwrap();

        assert_eq!(result.total_count, 0);
        assert!(result.places.is_empty());
        assert_eq!(aggregator.provider().call_count(), 0);
    }

    #[tokio::test]
    async fn test_single_batched_call_for_many_places() {
        let aggregator = InscriptionAggregator::new(MockCountProvider::with_counts(vec![
            ("a", 1),
            ("b", 2),
            ("c", 3),
        ]));
        let places = vec![
            place("a", "Aquileia", "settlement"),
            place("b", "Brigetio", "fort"),
            place("c", "Carnuntum", "settlement"),
        ];

        let result = aggregator.aggregate(&places).await.unwrap();

        assert_eq!(aggregator.provider().call_count(), 1);
        assert_eq!(result.total_count, 6);
    }

    #[tokio::test]
    async fn test_missing_ids_default_to_zero_in_input_order() {
        let aggregator =
            InscriptionAggregator::new(MockCountProvider::with_counts(vec![("A", 5)]));
        let places = vec![place("A", "Aquileia", "settlement"), place("B", "Brigetio", "fort")];

        let result = aggregator.aggregate(&places).await.unwrap();

        assert_eq!(result.total_count, 5);
        assert_eq!(
            result.places,
            vec![
                PlaceCountSummary {
                    place_id: "A".to_string(),
                    place_name: "Aquileia".to_string(),
                    count: 5,
                },
                PlaceCountSummary {
                    place_id: "B".to_string(),
                    place_name: "Brigetio".to_string(),
                    count: 0,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_duplicate_ids_sent_once() {
        let aggregator =
            InscriptionAggregator::new(MockCountProvider::with_counts(vec![("x", 4)]));
        // Same place on two selected layers.
        let places = vec![place("x", "Vindonissa", "fort"), place("x", "Vindonissa", "settlement")];

        let result = aggregator.aggregate(&places).await.unwrap();

        let sent = aggregator.provider().last_ids.lock().unwrap().clone();
        assert_eq!(sent, vec!["x".to_string()]);
        assert_eq!(result.places.len(), 2);
        assert_eq!(result.places[0].count, 4);
        assert_eq!(result.places[1].count, 4);
    }

    #[tokio::test]
    async fn test_lookup_failure_fails_whole_aggregation() {
        let aggregator = InscriptionAggregator::new(MockCountProvider::failing(
            LookupError::Http("HTTP 503".to_string()),
        ));
        let places = vec![place("a", "Aquileia", "settlement")];

        let result = aggregator.aggregate(&places).await;

        assert_eq!(result, Err(LookupError::Http("HTTP 503".to_string())));
        assert_eq!(aggregator.provider().call_count(), 1, "no retry");
    }
}

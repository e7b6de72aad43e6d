//! Selection service — wiring and orchestration.
//!
//! [`SelectionService`] owns the pieces of one selection flow and wires them
//! by explicit dependency injection: the map shell hands it the place index,
//! the count provider, and the display sink once at startup. (The original
//! application communicated these through globally attached mutable
//! callbacks; that pattern is deliberately gone.)
//!
//! One service instance drives one gesture at a time:
//!
//! ```text
//! arm_selection() → begin_drag(corner) → drag_preview(pos)* → complete_selection(corner)
//!                                      ↘ cancel_selection()
//! ```
//!
//! `complete_selection` takes the index snapshot synchronously — before the
//! first await point — so visibility toggles arriving while the batched
//! lookup is in flight cannot bleed into the running query.

mod error;

pub use error::ServiceError;

use std::sync::Arc;

use tracing::info;

use crate::aggregate::{InscriptionAggregator, SelectionResult};
use crate::coord::{BoundingBox, GeoPoint};
use crate::index::PlaceIndex;
use crate::selection::{places_within, RegionSelector, SelectorState};
use crate::sparql::{CountProvider, LookupError};

/// Progress of one selection, published to the display sink.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionUpdate {
    /// The box is finalized and the batched lookup is about to run.
    Loading {
        /// Number of places matched by the containment filter.
        matched: usize,
    },
    /// Aggregation finished.
    Completed(SelectionResult),
    /// The batched lookup failed; the selection did not produce counts.
    ///
    /// This is an explicit terminal state — a failure never leaves the
    /// display stuck on `Loading` and is never disguised as a zero count.
    Failed(LookupError),
}

/// Sink for selection progress, implemented by the presentation layer.
///
/// Publishing is fire-and-forget from the core's perspective.
pub trait ResultSink: Send + Sync {
    /// Receive a selection update.
    fn publish(&self, update: SelectionUpdate);
}

/// Drives the gesture → filter → aggregate flow against injected
/// collaborators.
pub struct SelectionService<P: CountProvider, S: ResultSink> {
    index: Arc<PlaceIndex>,
    selector: RegionSelector,
    aggregator: InscriptionAggregator<P>,
    sink: S,
}

impl<P: CountProvider, S: ResultSink> SelectionService<P, S> {
    /// Wire a service from its collaborators.
    pub fn new(index: Arc<PlaceIndex>, provider: P, sink: S) -> Self {
        Self {
            index,
            selector: RegionSelector::new(),
            aggregator: InscriptionAggregator::new(provider),
            sink,
        }
    }

    /// The shared place index (for layer population and visibility toggles).
    pub fn index(&self) -> &Arc<PlaceIndex> {
        &self.index
    }

    /// Current gesture state.
    pub fn selector_state(&self) -> SelectorState {
        self.selector.state()
    }

    /// Enter rectangle-selection mode. Single-click picking is suppressed
    /// until the gesture resolves or is cancelled.
    pub fn arm_selection(&mut self) -> Result<(), ServiceError> {
        self.selector.arm()?;
        Ok(())
    }

    /// Record the first corner of the rectangle.
    pub fn begin_drag(&mut self, corner: GeoPoint) {
        self.selector.pointer_down(corner);
    }

    /// Live preview box while dragging, for rendering only.
    pub fn drag_preview(&self, position: GeoPoint) -> Option<BoundingBox> {
        self.selector.pointer_move(position)
    }

    /// Abandon the gesture: nothing is filtered, looked up, or published.
    ///
    /// Returns whether an active gesture was discarded.
    pub fn cancel_selection(&mut self) -> bool {
        self.selector.cancel()
    }

    /// Finish the gesture and run the selection.
    ///
    /// Finalizes the box, snapshots the index, filters, publishes
    /// [`SelectionUpdate::Loading`], awaits the batched lookup, and
    /// publishes [`SelectionUpdate::Completed`] or
    /// [`SelectionUpdate::Failed`]. The result is also returned to the
    /// caller. A release without a preceding drag is ignored (`Ok(None)`).
    pub async fn complete_selection(
        &mut self,
        corner: GeoPoint,
    ) -> Result<Option<SelectionResult>, ServiceError> {
        let Some(bounds) = self.selector.pointer_up(corner) else {
            return Ok(None);
        };

        // Snapshot before any suspension point: the query must not observe
        // visibility changes made while the lookup is in flight.
        let snapshot = self.index.snapshot();
        let matched = places_within(&snapshot, &bounds);

        info!(bounds = %bounds, matched = matched.len(), "Running selection");
        self.sink.publish(SelectionUpdate::Loading {
            matched: matched.len(),
        });

        match self.aggregator.aggregate(&matched).await {
            Ok(result) => {
                self.sink.publish(SelectionUpdate::Completed(result.clone()));
                Ok(Some(result))
            }
            Err(error) => {
                self.sink.publish(SelectionUpdate::Failed(error.clone()));
                Err(error.into())
            }
        }
    }

    /// Single-click flow: count inscriptions for one place.
    ///
    /// Refused while a rectangle selection is armed or drawing, so the two
    /// interactions cannot interleave.
    pub async fn pick_count(
        &self,
        place_id: &str,
        location_id: Option<&str>,
    ) -> Result<u64, ServiceError> {
        if self.selector.is_pick_suppressed() {
            return Err(ServiceError::PickSuppressed);
        }
        let count = self
            .aggregator
            .provider()
            .lookup_count(place_id, location_id)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::Place;
    use crate::sparql::PlaceCount;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockProvider {
        counts: Vec<PlaceCount>,
        fail: bool,
        batch_calls: AtomicUsize,
        single_calls: AtomicUsize,
    }

    impl MockProvider {
        fn with_counts(counts: Vec<(&str, u64)>) -> Self {
            Self {
                counts: counts
                    .into_iter()
                    .map(|(id, count)| PlaceCount {
                        place_id: id.to_string(),
                        count,
                    })
                    .collect(),
                fail: false,
                batch_calls: AtomicUsize::new(0),
                single_calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                counts: Vec::new(),
                fail: true,
                batch_calls: AtomicUsize::new(0),
                single_calls: AtomicUsize::new(0),
            }
        }
    }

    impl CountProvider for MockProvider {
        async fn lookup_count(
            &self,
            _place_id: &str,
            _location_id: Option<&str>,
        ) -> Result<u64, LookupError> {
            self.single_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LookupError::Http("down".to_string()));
            }
            Ok(42)
        }

        async fn lookup_counts(&self, _ids: &[String]) -> Result<Vec<PlaceCount>, LookupError> {
            self.batch_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LookupError::Http("down".to_string()));
            }
            Ok(self.counts.clone())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        updates: Mutex<Vec<SelectionUpdate>>,
    }

    impl ResultSink for Arc<RecordingSink> {
        fn publish(&self, update: SelectionUpdate) {
            self.updates.lock().unwrap().push(update);
        }
    }

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn index_with_places() -> Arc<PlaceIndex> {
        let index = PlaceIndex::new();
        index.populate(
            "settlement",
            vec![
                Place::new("a", "Aquileia", point(5.0, 5.0), "settlement"),
                Place::new("far", "Faraway", point(50.0, 50.0), "settlement"),
            ],
        );
        Arc::new(index)
    }

    fn service(
        provider: MockProvider,
    ) -> (
        SelectionService<MockProvider, Arc<RecordingSink>>,
        Arc<RecordingSink>,
    ) {
        let sink = Arc::new(RecordingSink::default());
        let service = SelectionService::new(index_with_places(), provider, Arc::clone(&sink));
        (service, sink)
    }

    #[tokio::test]
    async fn test_full_selection_publishes_loading_then_completed() {
        let (mut service, sink) = service(MockProvider::with_counts(vec![("a", 3)]));

        service.arm_selection().unwrap();
        service.begin_drag(point(0.0, 0.0));
        let result = service
            .complete_selection(point(10.0, 10.0))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.total_count, 3);
        let updates = sink.updates.lock().unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0], SelectionUpdate::Loading { matched: 1 });
        assert!(matches!(&updates[1], SelectionUpdate::Completed(r) if r.total_count == 3));
    }

    #[tokio::test]
    async fn test_cancel_mid_drag_runs_nothing() {
        let (mut service, sink) = service(MockProvider::with_counts(vec![("a", 3)]));

        service.arm_selection().unwrap();
        service.begin_drag(point(0.0, 0.0));
        assert!(service.cancel_selection());

        assert_eq!(service.selector_state(), SelectorState::Idle);
        assert!(sink.updates.lock().unwrap().is_empty());
        // A stray release after cancel is also inert.
        let result = service.complete_selection(point(10.0, 10.0)).await.unwrap();
        assert!(result.is_none());
        assert_eq!(
            service.aggregator.provider().batch_calls.load(Ordering::SeqCst),
            0
        );
    }

    #[tokio::test]
    async fn test_empty_selection_completes_with_zero_without_lookup() {
        let (mut service, sink) = service(MockProvider::with_counts(vec![]));

        service.arm_selection().unwrap();
        // A box in the middle of the ocean.
        service.begin_drag(point(-40.0, -40.0));
        let result = service
            .complete_selection(point(-39.0, -39.0))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.total_count, 0);
        assert!(result.places.is_empty());
        assert_eq!(
            service.aggregator.provider().batch_calls.load(Ordering::SeqCst),
            0
        );
        let updates = sink.updates.lock().unwrap();
        assert_eq!(updates[0], SelectionUpdate::Loading { matched: 0 });
    }

    #[tokio::test]
    async fn test_failed_lookup_publishes_failed() {
        let (mut service, sink) = service(MockProvider::failing());

        service.arm_selection().unwrap();
        service.begin_drag(point(0.0, 0.0));
        let result = service.complete_selection(point(10.0, 10.0)).await;

        assert!(matches!(result, Err(ServiceError::Lookup(_))));
        let updates = sink.updates.lock().unwrap();
        assert_eq!(updates.len(), 2);
        assert!(matches!(&updates[1], SelectionUpdate::Failed(_)));
    }

    #[tokio::test]
    async fn test_pick_suppressed_while_armed_and_drawing() {
        let (mut service, _sink) = service(MockProvider::with_counts(vec![]));

        assert_eq!(service.pick_count("a", None).await.unwrap(), 42);

        service.arm_selection().unwrap();
        assert_eq!(
            service.pick_count("a", None).await,
            Err(ServiceError::PickSuppressed)
        );

        service.begin_drag(point(0.0, 0.0));
        assert_eq!(
            service.pick_count("a", None).await,
            Err(ServiceError::PickSuppressed)
        );

        service.complete_selection(point(1.0, 1.0)).await.unwrap();
        assert!(service.pick_count("a", None).await.is_ok(), "re-enabled after release");
    }

    #[tokio::test]
    async fn test_hidden_layer_excluded_from_selection() {
        let sink = Arc::new(RecordingSink::default());
        let index = index_with_places();
        index.set_visible("settlement", false);
        let mut service = SelectionService::new(
            index,
            MockProvider::with_counts(vec![("a", 3)]),
            Arc::clone(&sink),
        );

        service.arm_selection().unwrap();
        service.begin_drag(point(0.0, 0.0));
        let result = service
            .complete_selection(point(10.0, 10.0))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.total_count, 0);
        assert!(result.places.is_empty());
    }
}

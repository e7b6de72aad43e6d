//! PlaceIndex — in-memory store of place layers.
//!
//! The [`PlaceIndex`] holds every loaded thematic layer: a list of
//! [`Place`] records plus one visibility flag, keyed by layer name. Layers
//! are created implicitly on first population and replaced wholesale on
//! repopulation; visibility is toggled independently by the UI shell.
//!
//! # Thread Safety
//!
//! Layer access goes through a `DashMap` (concurrent reads, per-shard write
//! locks). A layer's place list is an `Arc<[Place]>` swapped atomically by
//! [`PlaceIndex::populate`], so readers see either the old or the new list,
//! never a partial one.
//!
//! # Snapshot Isolation
//!
//! [`PlaceIndex::snapshot`] captures the place lists and visibility flags at
//! call time. Toggling visibility or repopulating a layer afterwards never
//! affects an already-taken snapshot; a selection query that filters a
//! snapshot is therefore isolated from concurrent UI changes.

use std::sync::Arc;

use dashmap::DashMap;

use crate::place::Place;

/// Internal storage for one layer.
struct LayerStore {
    places: Arc<[Place]>,
    visible: bool,
}

/// A captured view of one layer.
#[derive(Debug, Clone)]
pub struct LayerSnapshot {
    /// Layer key, e.g. `"settlement"`.
    pub layer_key: String,
    /// Visibility flag at capture time.
    pub visible: bool,
    /// Places in load order, shared with the index.
    pub places: Arc<[Place]>,
}

/// A captured view of the whole index.
///
/// Layers are ordered by key so snapshot iteration (and everything derived
/// from it, filter output included) is deterministic.
#[derive(Debug, Clone, Default)]
pub struct PlaceSnapshot {
    layers: Vec<LayerSnapshot>,
}

impl PlaceSnapshot {
    /// Iterate all places with their layer's captured visibility flag.
    pub fn iter(&self) -> impl Iterator<Item = (&Place, bool)> {
        self.layers
            .iter()
            .flat_map(|layer| layer.places.iter().map(move |p| (p, layer.visible)))
    }

    /// The captured layers, ordered by key.
    pub fn layers(&self) -> &[LayerSnapshot] {
        &self.layers
    }

    /// Total number of places across all captured layers.
    pub fn total_places(&self) -> usize {
        self.layers.iter().map(|l| l.places.len()).sum()
    }

    /// True if no layer was loaded at capture time.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// In-memory store of place layers.
pub struct PlaceIndex {
    layers: DashMap<String, LayerStore>,
}

impl PlaceIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self {
            layers: DashMap::new(),
        }
    }

    /// Replace a layer's places wholesale.
    ///
    /// Creates the layer (visible) if it doesn't exist yet; an existing
    /// layer keeps its visibility flag across repopulation.
    pub fn populate(&self, layer_key: &str, places: Vec<Place>) {
        let places: Arc<[Place]> = places.into();
        let count = places.len();

        match self.layers.get_mut(layer_key) {
            Some(mut store) => store.places = places,
            None => {
                self.layers.insert(
                    layer_key.to_string(),
                    LayerStore {
                        places,
                        visible: true,
                    },
                );
            }
        }

        tracing::debug!(layer = layer_key, places = count, "Populated layer");
    }

    /// Set a layer's visibility flag.
    ///
    /// Returns `false` if the layer doesn't exist.
    pub fn set_visible(&self, layer_key: &str, visible: bool) -> bool {
        match self.layers.get_mut(layer_key) {
            Some(mut store) => {
                store.visible = visible;
                true
            }
            None => false,
        }
    }

    /// A layer's current visibility flag, or `None` if it doesn't exist.
    pub fn is_visible(&self, layer_key: &str) -> Option<bool> {
        self.layers.get(layer_key).map(|store| store.visible)
    }

    /// Unload a layer, destroying its places.
    ///
    /// Returns `false` if the layer didn't exist.
    pub fn remove_layer(&self, layer_key: &str) -> bool {
        self.layers.remove(layer_key).is_some()
    }

    /// All layer keys, sorted.
    pub fn layer_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.layers.iter().map(|e| e.key().clone()).collect();
        keys.sort_unstable();
        keys
    }

    /// Total number of places across all layers.
    pub fn total_places(&self) -> usize {
        self.layers.iter().map(|e| e.places.len()).sum()
    }

    /// True if no layer is loaded.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Capture the current layers and visibility flags.
    ///
    /// O(total layers): place lists are Arc-shared, not cloned. The result
    /// is isolated from any later mutation of the index.
    pub fn snapshot(&self) -> PlaceSnapshot {
        let mut layers: Vec<LayerSnapshot> = self
            .layers
            .iter()
            .map(|entry| LayerSnapshot {
                layer_key: entry.key().clone(),
                visible: entry.visible,
                places: Arc::clone(&entry.places),
            })
            .collect();
        layers.sort_unstable_by(|a, b| a.layer_key.cmp(&b.layer_key));

        PlaceSnapshot { layers }
    }
}

impl Default for PlaceIndex {
    fn default() -> Self {
        Self::new()
    }
}

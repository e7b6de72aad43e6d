//! Place records and the thematic layer taxonomy.
//!
//! A [`Place`] is a point of interest with a stable identifier (a Pleiades
//! numeric id or a custom location id), a display name, a validated
//! position, and the key of the thematic layer it belongs to. Places are
//! created once per layer load and are immutable afterwards; reloading a
//! layer replaces its places wholesale.
//!
//! The layer taxonomy mirrors the Pleiades place-type vocabulary used by the
//! source datasets: a record whose `placeTypes` match several layers is
//! emitted once per matching layer.

mod parser;

pub use parser::{ParseError, PlaceParser};

use crate::coord::GeoPoint;

/// Layer keys and the source place-type spellings that map onto them.
///
/// Some Pleiades types carry a variant suffix (`fort-2`, `temple-2`); both
/// spellings fold into the same layer.
pub const PLACE_TYPE_LAYERS: &[(&str, &[&str])] = &[
    ("settlement", &["settlement"]),
    ("villa", &["villa"]),
    ("fort", &["fort", "fort-2"]),
    ("temple", &["temple", "temple-2"]),
    ("station", &["station"]),
    ("archaeological", &["archaeological-site"]),
    ("cemetery", &["cemetery"]),
    ("sanctuary", &["sanctuary"]),
    ("bridge", &["bridge"]),
    ("aqueduct", &["aqueduct"]),
    ("church", &["church"]),
    ("bath", &["bath"]),
    ("quarry", &["quarry"]),
    ("port", &["port"]),
    ("theater", &["theater"]),
    ("amphitheatre", &["amphitheatre"]),
];

/// Resolve the layer keys a record belongs to from its source place types.
///
/// Returns keys in taxonomy order; an unrecognized type contributes nothing.
pub fn layers_for_types<S: AsRef<str>>(place_types: &[S]) -> Vec<&'static str> {
    PLACE_TYPE_LAYERS
        .iter()
        .filter(|(_, aliases)| {
            place_types
                .iter()
                .any(|t| aliases.contains(&t.as_ref()))
        })
        .map(|(key, _)| *key)
        .collect()
}

/// A point of interest with a stable id and location.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Stable identifier: Pleiades numeric id or custom location id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Validated WGS84 position.
    pub position: GeoPoint,
    /// Key of the thematic layer this record belongs to.
    pub layer_key: String,
}

impl Place {
    /// Create a new place record.
    pub fn new(id: &str, name: &str, position: GeoPoint, layer_key: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            position,
            layer_key: layer_key.to_string(),
        }
    }
}

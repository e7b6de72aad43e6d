//! Parsers for the place-bearing source datasets.
//!
//! Three source shapes feed the index:
//! - Pleiades JSON-LD: a `@graph` array of records with `reprPoint`
//!   (`[lon, lat]`), `placeTypes`, `title`, and `id`.
//! - GeoJSON: a `FeatureCollection` of `Point` features (custom place
//!   exports), all assigned to one caller-chosen layer.
//! - NDJSON: one GeoJSON feature per line; unparseable lines are skipped.
//!
//! Per-record coordinate failures are dropped at this boundary so nothing
//! invalid ever reaches the index; document-level failures are typed errors.

use std::io::{BufRead, BufReader, Read};

use serde::Deserialize;
use serde_json::Value;

use super::{layers_for_types, Place};
use crate::coord::GeoPoint;

/// Error type for document-level parse failures.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// One record of a Pleiades JSON-LD `@graph` array.
#[derive(Debug, Deserialize)]
struct PleiadesRecord {
    /// Pleiades serializes ids as either numbers or strings.
    id: Option<Value>,
    title: Option<String>,
    /// Representative point, `[lon, lat]`.
    #[serde(rename = "reprPoint")]
    repr_point: Option<Vec<f64>>,
    #[serde(rename = "placeTypes", default)]
    place_types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PleiadesDocument {
    #[serde(rename = "@graph")]
    graph: Vec<PleiadesRecord>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    id: Option<Value>,
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Value,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Value,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

/// Parser for the place-bearing source datasets.
pub struct PlaceParser;

impl PlaceParser {
    /// Parse a Pleiades JSON-LD document into place records.
    ///
    /// A record joins every layer its `placeTypes` match; records without a
    /// representative point, with out-of-range coordinates, or without an id
    /// are dropped.
    pub fn parse_pleiades<R: Read>(reader: R) -> Result<Vec<Place>, ParseError> {
        let document: PleiadesDocument = serde_json::from_reader(reader)?;

        let mut places = Vec::new();
        let mut dropped = 0usize;
        for record in &document.graph {
            match Self::pleiades_record_places(record) {
                Some(mut record_places) => places.append(&mut record_places),
                None => {
                    dropped += 1;
                    tracing::debug!(
                        id = ?record.id,
                        title = ?record.title,
                        "Dropping place record without usable id or position"
                    );
                }
            }
        }

        tracing::info!(
            records = document.graph.len(),
            places = places.len(),
            dropped,
            "Parsed Pleiades places"
        );
        Ok(places)
    }

    /// Parse a GeoJSON FeatureCollection of points into one layer.
    pub fn parse_geojson<R: Read>(reader: R, layer_key: &str) -> Result<Vec<Place>, ParseError> {
        let collection: FeatureCollection = serde_json::from_reader(reader)?;

        let mut places = Vec::new();
        let mut dropped = 0usize;
        for feature in &collection.features {
            match Self::feature_place(feature, layer_key) {
                Some(place) => places.push(place),
                None => dropped += 1,
            }
        }

        tracing::info!(
            layer = layer_key,
            places = places.len(),
            dropped,
            "Parsed GeoJSON places"
        );
        Ok(places)
    }

    /// Parse newline-delimited GeoJSON features into one layer.
    ///
    /// Lines that fail to parse as JSON are skipped, matching the tolerant
    /// behavior expected from NDJSON feeds; non-point features are dropped.
    pub fn parse_ndjson<R: Read>(reader: R, layer_key: &str) -> Result<Vec<Place>, ParseError> {
        let reader = BufReader::new(reader);

        let mut places = Vec::new();
        let mut dropped = 0usize;
        let mut skipped_lines = 0usize;
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let feature: Feature = match serde_json::from_str(&line) {
                Ok(f) => f,
                Err(_) => {
                    skipped_lines += 1;
                    continue;
                }
            };
            match Self::feature_place(&feature, layer_key) {
                Some(place) => places.push(place),
                None => dropped += 1,
            }
        }

        tracing::info!(
            layer = layer_key,
            places = places.len(),
            dropped,
            skipped_lines,
            "Parsed NDJSON places"
        );
        Ok(places)
    }

    /// Expand one Pleiades record into a place per matching layer.
    fn pleiades_record_places(record: &PleiadesRecord) -> Option<Vec<Place>> {
        let id = record.id.as_ref().and_then(value_to_id)?;
        let point = record.repr_point.as_deref()?;
        // reprPoint follows GeoJSON axis order: longitude first.
        let &[lon, lat, ..] = point else { return None };
        let position = GeoPoint::new(lat, lon).ok()?;

        let name = record.title.clone().unwrap_or_else(|| "Unnamed".to_string());
        let layers = layers_for_types(&record.place_types);
        if layers.is_empty() {
            return None;
        }

        Some(
            layers
                .into_iter()
                .map(|layer_key| Place::new(&id, &name, position, layer_key))
                .collect(),
        )
    }

    /// Convert one GeoJSON point feature into a place.
    fn feature_place(feature: &Feature, layer_key: &str) -> Option<Place> {
        let geometry = feature.geometry.as_ref()?;
        if geometry.kind != "Point" {
            return None;
        }
        let coords = geometry.coordinates.as_array()?;
        let lon = coords.first()?.as_f64()?;
        let lat = coords.get(1)?.as_f64()?;
        let position = GeoPoint::new(lat, lon).ok()?;

        let id = feature
            .properties
            .get("id")
            .and_then(value_to_id)
            .or_else(|| feature.id.as_ref().and_then(value_to_id))?;
        let name = feature
            .properties
            .get("title")
            .or_else(|| feature.properties.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("Unnamed");

        Some(Place::new(&id, name, position, layer_key))
    }
}

/// Stringify an id that sources serialize as either a number or a string.
fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

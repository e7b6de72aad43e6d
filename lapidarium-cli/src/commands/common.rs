//! Shared helpers for the subcommands.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use lapidarium::config::Settings;
use lapidarium::index::PlaceIndex;
use lapidarium::place::{Place, PlaceParser};

use crate::error::CliError;

/// Load settings from the given file, or defaults when none is given.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    match path {
        Some(path) => Ok(Settings::from_file(path)?),
        None => Ok(Settings::default()),
    }
}

/// Load a places file into a fresh index, one layer per layer key.
///
/// The format is chosen by extension: `.ndjson` parses line-delimited
/// features and `.geojson` a FeatureCollection (both into `fallback_layer`);
/// anything else is treated as a Pleiades JSON-LD document, whose records
/// carry their own layer keys.
pub fn load_index(path: &Path, fallback_layer: &str) -> Result<PlaceIndex, CliError> {
    let file = File::open(path).map_err(|error| CliError::FileRead {
        path: path.display().to_string(),
        error,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let places = match extension {
        "ndjson" => PlaceParser::parse_ndjson(file, fallback_layer)?,
        "geojson" => PlaceParser::parse_geojson(file, fallback_layer)?,
        _ => PlaceParser::parse_pleiades(file)?,
    };

    let index = PlaceIndex::new();
    for (layer_key, layer_places) in group_by_layer(places) {
        index.populate(&layer_key, layer_places);
    }
    Ok(index)
}

/// Group parsed places by their layer key, keys sorted.
pub fn group_by_layer(places: Vec<Place>) -> BTreeMap<String, Vec<Place>> {
    let mut layers: BTreeMap<String, Vec<Place>> = BTreeMap::new();
    for place in places {
        layers.entry(place.layer_key.clone()).or_default().push(place);
    }
    layers
}

/// Hide the named layers, rejecting names that don't exist.
pub fn hide_layers(index: &PlaceIndex, hidden: &[String]) -> Result<(), CliError> {
    for layer_key in hidden {
        if !index.set_visible(layer_key, false) {
            return Err(CliError::UnknownLayer(layer_key.clone()));
        }
    }
    Ok(())
}

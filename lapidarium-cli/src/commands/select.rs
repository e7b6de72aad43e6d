//! Select command — rectangle selection with count aggregation.
//!
//! Drives the same gesture path a map front-end would: arm, press the first
//! corner, release the second, then print the aggregated result.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use lapidarium::config::Settings;
use lapidarium::coord::GeoPoint;
use lapidarium::service::{ResultSink, SelectionService, SelectionUpdate};
use lapidarium::sparql::{AsyncReqwestClient, SparqlClient};

use crate::commands::common;
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct SelectArgs {
    /// Places file (.json JSON-LD, .geojson, or .ndjson)
    pub places_file: PathBuf,

    /// First corner of the rectangle, as LAT,LON
    #[arg(long, value_parser = parse_corner)]
    pub from: GeoPoint,

    /// Opposite corner of the rectangle, as LAT,LON
    #[arg(long, value_parser = parse_corner)]
    pub to: GeoPoint,

    /// Hide a layer before selecting (repeatable)
    #[arg(long = "hide", value_name = "LAYER")]
    pub hidden: Vec<String>,

    /// Layer key for GeoJSON/NDJSON sources that don't carry their own
    #[arg(long, default_value = "custom")]
    pub layer: String,
}

/// Parse a `LAT,LON` corner argument.
fn parse_corner(raw: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{raw}'"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;
    GeoPoint::new(lat, lon).map_err(|e| e.to_string())
}

/// Sink printing selection progress to stderr as it happens.
struct ConsoleSink;

impl ResultSink for ConsoleSink {
    fn publish(&self, update: SelectionUpdate) {
        match update {
            SelectionUpdate::Loading { matched } => {
                eprintln!("{matched} place(s) in selection, querying endpoint...");
            }
            // The final result is printed by the command itself.
            SelectionUpdate::Completed(_) => {}
            SelectionUpdate::Failed(error) => {
                eprintln!("Selection failed: {error}");
            }
        }
    }
}

/// Run the select command.
pub async fn run(args: &SelectArgs, settings: &Settings) -> Result<(), CliError> {
    let index = Arc::new(common::load_index(&args.places_file, &args.layer)?);
    common::hide_layers(&index, &args.hidden)?;
    for layer_key in &settings.hidden_layers {
        // Configured hidden layers may not exist in this file; that's fine.
        index.set_visible(layer_key, false);
    }

    tracing::info!(
        places = index.total_places(),
        layers = index.layer_keys().len(),
        endpoint = %settings.endpoint.url,
        "Starting selection"
    );

    let http = AsyncReqwestClient::with_timeout(settings.endpoint.timeout_secs)?;
    let provider = SparqlClient::new(http, &settings.endpoint.url);
    let mut service = SelectionService::new(index, provider, ConsoleSink);

    service.arm_selection()?;
    service.begin_drag(args.from);
    let Some(result) = service.complete_selection(args.to).await? else {
        // Unreachable after a successful arm + drag, but harmless.
        return Ok(());
    };

    if result.places.is_empty() {
        println!("No places in selection.");
        return Ok(());
    }

    println!("{:<12} {:<28} {:>6}", "PLACE ID", "NAME", "COUNT");
    for row in &result.places {
        println!("{:<12} {:<28} {:>6}", row.place_id, row.place_name, row.count);
    }
    println!();
    println!(
        "{} inscription(s) across {} place(s)",
        result.total_count,
        result.places.len()
    );

    Ok(())
}

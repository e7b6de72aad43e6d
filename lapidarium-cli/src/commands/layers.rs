//! Layers command — load a places file and summarize its layers.

use std::path::PathBuf;

use clap::Args;

use crate::commands::common;
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct LayersArgs {
    /// Places file (.json JSON-LD, .geojson, or .ndjson)
    pub places_file: PathBuf,

    /// Layer key for GeoJSON/NDJSON sources that don't carry their own
    #[arg(long, default_value = "custom")]
    pub layer: String,
}

/// Run the layers command.
pub fn run(args: &LayersArgs) -> Result<(), CliError> {
    let index = common::load_index(&args.places_file, &args.layer)?;

    if index.is_empty() {
        println!("No layers loaded from {}", args.places_file.display());
        return Ok(());
    }

    println!("{:<16} {:>8}", "LAYER", "PLACES");
    let snapshot = index.snapshot();
    for layer in snapshot.layers() {
        println!("{:<16} {:>8}", layer.layer_key, layer.places.len());
    }
    println!();
    println!("{} places across {} layers", snapshot.total_places(), snapshot.layers().len());

    Ok(())
}

//! Lapidarium CLI - command-line interface.
//!
//! This binary drives the lapidarium library the way a map shell would:
//! load place layers, toggle visibility, run a rectangle selection against
//! the inscription endpoint, or look up a single place.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{common, count, layers, select};
use error::CliError;

#[derive(Parser)]
#[command(name = "lapidarium")]
#[command(version = lapidarium::VERSION)]
#[command(about = "Explore inscription counts around Roman-era places", long_about = None)]
struct Cli {
    /// Path to a JSON config file (endpoint URL, timeout, hidden layers)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a places file and summarize its layers
    Layers(layers::LayersArgs),
    /// Run a rectangle selection and aggregate inscription counts
    Select(select::SelectArgs),
    /// Count inscriptions for a single place
    Count(count::CountArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _guard = match lapidarium::logging::init(
        lapidarium::logging::default_log_dir(),
        lapidarium::logging::default_log_file(),
    ) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    if let Err(e) = run(cli).await {
        e.exit();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = common::load_settings(cli.config.as_deref())?;

    match &cli.command {
        Command::Layers(args) => layers::run(args),
        Command::Select(args) => select::run(args, &settings).await,
        Command::Count(args) => count::run(args, &settings).await,
    }
}

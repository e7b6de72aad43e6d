//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and an appropriate exit code.

use std::process;

use lapidarium::config::ConfigError;
use lapidarium::place::ParseError;
use lapidarium::service::ServiceError;
use lapidarium::sparql::LookupError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Failed to initialize logging.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Configuration file problem.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A data file could not be read.
    #[error("Failed to read {path}: {error}")]
    FileRead {
        path: String,
        error: std::io::Error,
    },

    /// A data file could not be parsed.
    #[error("Failed to parse places: {0}")]
    Parse(#[from] ParseError),

    /// The endpoint lookup failed.
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// The selection service refused an operation.
    #[error("{0}")]
    Service(#[from] ServiceError),

    /// A named layer does not exist in the loaded data.
    #[error("Unknown layer '{0}' (see the `layers` command for available keys)")]
    UnknownLayer(String),
}

impl CliError {
    /// Exit the process with an error message and exit code 1.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::Lookup(_) | CliError::Service(ServiceError::Lookup(_)) = self {
            eprintln!();
            eprintln!("The SPARQL endpoint could not be queried. Check:");
            eprintln!("  1. Network connectivity");
            eprintln!("  2. The endpoint URL in your config file");
            eprintln!("  3. Whether the endpoint is rate-limiting requests");
        }

        process::exit(1)
    }
}

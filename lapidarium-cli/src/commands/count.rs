//! Count command — single-place inscription count.

use clap::Args;

use lapidarium::config::Settings;
use lapidarium::sparql::{AsyncReqwestClient, CountProvider, SparqlClient};

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct CountArgs {
    /// Place id (Pleiades numeric id or custom id)
    pub place_id: String,

    /// Custom location id, widening the query to found-location links
    #[arg(long)]
    pub location_id: Option<String>,
}

/// Run the count command.
pub async fn run(args: &CountArgs, settings: &Settings) -> Result<(), CliError> {
    let http = AsyncReqwestClient::with_timeout(settings.endpoint.timeout_secs)?;
    let client = SparqlClient::new(http, &settings.endpoint.url);

    let count = client
        .lookup_count(&args.place_id, args.location_id.as_deref())
        .await?;

    println!("{} inscription(s) for place {}", count, args.place_id);
    Ok(())
}

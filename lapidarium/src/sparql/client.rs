//! SPARQL endpoint client implementing the count lookups.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use super::http::AsyncHttpClient;
use super::query;
use super::types::{CountProvider, LookupError, PlaceCount};

/// Media type of the expected response shape.
const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Standard SPARQL JSON results envelope, reduced to what the lookups read.
#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<HashMap<String, SparqlTerm>>,
}

#[derive(Debug, Deserialize)]
struct SparqlTerm {
    value: String,
}

/// Count lookup client for a SPARQL 1.1 endpoint.
///
/// Queries go out as form-urlencoded POSTs (`query=...`) with
/// `Accept: application/sparql-results+json`, and the tabular bindings come
/// back as [`PlaceCount`] rows. The HTTP transport is injected.
pub struct SparqlClient<H: AsyncHttpClient> {
    http: H,
    endpoint: String,
}

impl<H: AsyncHttpClient> SparqlClient<H> {
    /// Create a client for one endpoint URL.
    pub fn new(http: H, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
        }
    }

    /// The endpoint URL this client queries.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute(&self, sparql: &str) -> Result<SparqlResponse, LookupError> {
        let body = self
            .http
            .post_form(&self.endpoint, &[("query", sparql)], SPARQL_RESULTS_JSON)
            .await?;

        serde_json::from_slice(&body)
            .map_err(|e| LookupError::InvalidResponse(format!("Malformed results JSON: {}", e)))
    }
}

/// Read one variable out of a binding row.
fn binding_value<'a>(
    binding: &'a HashMap<String, SparqlTerm>,
    variable: &str,
) -> Result<&'a str, LookupError> {
    binding
        .get(variable)
        .map(|term| term.value.as_str())
        .ok_or_else(|| LookupError::InvalidResponse(format!("Binding missing ?{}", variable)))
}

/// Parse a count literal.
fn parse_count(raw: &str) -> Result<u64, LookupError> {
    raw.parse::<u64>()
        .map_err(|_| LookupError::InvalidResponse(format!("Non-numeric count: {:?}", raw)))
}

impl<H: AsyncHttpClient> CountProvider for SparqlClient<H> {
    async fn lookup_count(
        &self,
        place_id: &str,
        location_id: Option<&str>,
    ) -> Result<u64, LookupError> {
        let sparql = query::single_count_query(place_id, location_id);
        let response = self.execute(&sparql).await?;

        // An empty result set means the store has nothing for this place.
        let count = match response.results.bindings.first() {
            Some(binding) => parse_count(binding_value(binding, "count")?)?,
            None => 0,
        };

        debug!(place_id, count, "Single count lookup");
        Ok(count)
    }

    async fn lookup_counts(&self, place_ids: &[String]) -> Result<Vec<PlaceCount>, LookupError> {
        if place_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sparql = query::batched_counts_query(place_ids);
        let response = self.execute(&sparql).await?;

        let mut counts = Vec::with_capacity(response.results.bindings.len());
        for binding in &response.results.bindings {
            counts.push(PlaceCount {
                place_id: binding_value(binding, "placeId")?.to_string(),
                count: parse_count(binding_value(binding, "count")?)?,
            });
        }

        debug!(
            requested = place_ids.len(),
            returned = counts.len(),
            "Batched count lookup"
        );
        Ok(counts)
    }
}

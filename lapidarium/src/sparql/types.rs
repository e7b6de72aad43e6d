//! Lookup collaborator types and traits.

use std::future::Future;

/// Errors that can occur during a count lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    /// HTTP transport failed or the endpoint returned an error status.
    #[error("HTTP error: {0}")]
    Http(String),
    /// The endpoint answered with something other than the expected
    /// SPARQL results shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// One row of a batched count response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceCount {
    /// The place id the count belongs to.
    pub place_id: String,
    /// Number of inscriptions linked to the place.
    pub count: u64,
}

/// Trait for the external inscription-counting collaborator.
///
/// Implementors answer count queries for places; the selection core never
/// constructs queries itself.
pub trait CountProvider: Send + Sync {
    /// Count inscriptions for a single place (the single-click flow).
    ///
    /// `location_id` optionally widens the query to a custom location id
    /// for records linked by found-location instead of a Pleiades id.
    fn lookup_count(
        &self,
        place_id: &str,
        location_id: Option<&str>,
    ) -> impl Future<Output = Result<u64, LookupError>> + Send;

    /// Count inscriptions for many places in one request.
    ///
    /// Ids with no data may simply be omitted from the result; an id never
    /// appears twice. Callers must treat omissions as zero.
    fn lookup_counts(
        &self,
        place_ids: &[String],
    ) -> impl Future<Output = Result<Vec<PlaceCount>, LookupError>> + Send;
}

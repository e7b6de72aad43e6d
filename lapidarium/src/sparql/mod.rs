//! Inscription count lookup against a remote SPARQL endpoint.
//!
//! This module is the boundary to the external epigraphic store. The store
//! itself is opaque: it receives SPARQL over HTTP and answers with tabular
//! `application/sparql-results+json` bindings. Everything above this module
//! talks to the [`CountProvider`] trait, so tests and alternative backends
//! plug in without touching the selection flow.
//!
//! # Dependency Injection
//!
//! The HTTP transport is abstracted behind [`AsyncHttpClient`] so the
//! endpoint client can be driven by a mock in tests:
//!
//! ```ignore
//! use lapidarium::sparql::{AsyncReqwestClient, SparqlClient};
//!
//! let http = AsyncReqwestClient::new()?;
//! let client = SparqlClient::new(http, "https://dydra.com/junjun7613/inscriptions_llm/sparql");
//! let counts = client.lookup_counts(&ids).await?;
//! ```

mod client;
mod http;
mod query;
mod types;

pub use client::SparqlClient;
pub use http::{AsyncHttpClient, AsyncReqwestClient};
pub use query::{batched_counts_query, single_count_query};
pub use types::{CountProvider, LookupError, PlaceCount};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;

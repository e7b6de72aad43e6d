//! HTTP client abstraction for the SPARQL endpoint.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use super::types::LookupError;

/// Default timeout for endpoint requests, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Trait for the async HTTP transport.
///
/// SPARQL 1.1 Protocol queries go out as form-urlencoded POSTs; the trait
/// covers exactly that, which keeps mocks trivial.
pub trait AsyncHttpClient: Send + Sync {
    /// Perform a POST with `application/x-www-form-urlencoded` parameters.
    ///
    /// # Arguments
    ///
    /// * `url` - The endpoint URL
    /// * `params` - Form parameters, encoded by the implementation
    /// * `accept` - Value for the `Accept` header
    ///
    /// # Returns
    ///
    /// The response body as bytes, or an error for transport failures and
    /// non-success statuses.
    fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
        accept: &str,
    ) -> impl Future<Output = Result<Vec<u8>, LookupError>> + Send;
}

/// Real HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

/// User-Agent for endpoint requests; some public endpoints reject
/// agent-less clients.
const USER_AGENT: &str = concat!("lapidarium/", env!("CARGO_PKG_VERSION"));

impl AsyncReqwestClient {
    /// Create a client with the default timeout.
    pub fn new() -> Result<Self, LookupError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LookupError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
        accept: &str,
    ) -> Result<Vec<u8>, LookupError> {
        debug!(url = url, "POST to SPARQL endpoint");

        let response = self
            .client
            .post(url)
            .header("Accept", accept)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                warn!(url = url, error = %e, is_timeout = e.is_timeout(), "Request failed");
                LookupError::Http(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            warn!(
                url = url,
                status = response.status().as_u16(),
                "HTTP error status"
            );
            return Err(LookupError::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| LookupError::Http(format!("Failed to read response: {}", e)))
    }
}

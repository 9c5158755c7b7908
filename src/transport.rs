//! The HTTP transport a geocoder sends its requests through.
//!
//! [`ReqwestTransport`] is used unless another [`HttpTransport`] is injected with
//! [`GeocoderBuilder::transport`](crate::GeocoderBuilder::transport). Connection
//! pooling, TLS and timeouts are the transport's business.

use crate::error::BoxError;
use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use std::fmt;
use std::time::Duration;

/// A request as handed to the transport.
///
/// `uri` is the fully rendered request URI. It is not validated or
/// percent-encoded by the geocoder.
#[derive(Debug, Clone, Copy)]
pub struct TransportRequest<'a> {
    /// The HTTP method. The geocoder only issues `GET`.
    pub method: &'a Method,
    /// The full request URI.
    pub uri: &'a str,
}

/// A completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The response body, owned by the caller.
    pub body: Vec<u8>,
}

/// Executes HTTP requests for a geocoder.
///
/// Implementations must be safe to share between concurrent calls.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and returns the full response, or the error that
    /// prevented one. A non-2xx status is a response, not an error.
    async fn execute(&self, request: TransportRequest<'_>) -> Result<TransportResponse, BoxError>;
}

/// [`HttpTransport`] backed by a `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with reqwest's default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn new() -> crate::Result<Self> {
        Self::from_builder(reqwest::Client::builder())
    }

    /// Creates a transport whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn with_timeout(timeout: Duration) -> crate::Result<Self> {
        Self::from_builder(reqwest::Client::builder().timeout(timeout))
    }

    /// Wraps an existing, already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn from_builder(builder: reqwest::ClientBuilder) -> crate::Result<Self> {
        let client = builder.build().map_err(|e| {
            crate::Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self { client })
    }
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest<'_>) -> Result<TransportResponse, BoxError> {
        let response = self
            .client
            .request(request.method.clone(), request.uri)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

//! Error types for geocoding calls.
//!
//! Every failure is terminal for the call that produced it: nothing is retried
//! and no partial response is returned. Errors that happen after the API
//! answered keep the raw response body so it can be inspected.

use crate::rate_limit::RateLimit;
use http::StatusCode;

/// Boxed error produced by an [`HttpTransport`](crate::HttpTransport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for geocoding calls.
///
/// # Examples
///
/// ```no_run
/// use mapbox_geocoding::{Error, Geocoder, GeoPoint, ReverseGeocodeRequest};
///
/// # async fn example() -> Result<(), Error> {
/// let geocoder = Geocoder::builder().access_token("pk.test").build()?;
/// let request = ReverseGeocodeRequest::new(GeoPoint::new(-77.05, 38.889));
///
/// match geocoder.reverse_geocode(&request).await {
///     Ok(response) => println!("{} features", response.features.len()),
///     Err(Error::HttpError { status, raw_response, .. }) => {
///         eprintln!("Mapbox answered {}: {}", status, raw_response);
///     }
///     Err(e) => eprintln!("Geocoding failed: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The HTTP transport failed to complete the request.
    ///
    /// The transport's own error is passed through untouched.
    #[error(transparent)]
    Transport(BoxError),

    /// The API answered with a status other than `200 OK`.
    #[error("failed to geocode URI {uri}: status {status}, response: {raw_response}")]
    HttpError {
        /// The full request URI, including the access token.
        uri: String,
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
        /// Rate limit headers sent with the failed response
        rate_limit: RateLimit,
    },

    /// The response body is not the JSON shape of a geocoding response.
    #[error("failed to deserialize geocode response ({source}): {raw_response}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// A reverse geocoding response echoed a query that is not a `[lon, lat]` pair.
    #[error("unexpected len of query coordinates {len} in response: {raw_response}")]
    UnexpectedQueryLength {
        /// Number of elements found in the `query` array
        len: usize,
        /// The raw response body
        raw_response: String,
    },

    /// Invalid configuration was provided.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An invalid root API URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns the HTTP status code for [`Error::HttpError`].
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::HttpError { raw_response, .. }
            | Error::DeserializationFailed { raw_response, .. }
            | Error::UnexpectedQueryLength { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns the rate limit headers of a failed response.
    ///
    /// On a 429 this tells when the quota window resets.
    pub fn rate_limit(&self) -> Option<&RateLimit> {
        match self {
            Error::HttpError { rate_limit, .. } => Some(rate_limit),
            _ => None,
        }
    }

    /// Returns `true` if the API rejected the call because the quota is exhausted (429).
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(StatusCode::TOO_MANY_REQUESTS)
    }
}

/// A specialized `Result` type for geocoding calls.
pub type Result<T> = std::result::Result<T, Error>;

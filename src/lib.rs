//! # mapbox-geocoding - a Mapbox geocoding v5 client
//!
//! Turns typed reverse and forward geocoding requests into Mapbox API calls and
//! parses the answers into typed features, keeping the raw body and the rate
//! limit headers of every response.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mapbox_geocoding::{ForwardGeocodeRequest, Geocoder, GeoPoint, ReverseGeocodeRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mapbox_geocoding::Error> {
//!     // MAPBOX_ACCESS_TOKEN overrides the token given here when set
//!     let geocoder = Geocoder::builder()
//!         .access_token("pk.my-token")
//!         .build()?;
//!
//!     // Coordinates to places
//!     let request = ReverseGeocodeRequest::new(GeoPoint::new(-77.0501629, 38.8892227))
//!         .with_types(["address"]);
//!     let response = geocoder.reverse_geocode(&request).await?;
//!     for feature in &response.features {
//!         println!("{} ({})", feature.place_name, feature.relevance);
//!     }
//!
//!     // Text to places
//!     let request = ForwardGeocodeRequest::new("Washington").with_limit(3);
//!     let response = geocoder.forward_geocode(&request).await?;
//!     println!("{:?}", response.first().map(|f| &f.center));
//!     println!("Requests per window: {:?}", response.rate_limit.limit_value());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed requests** - every API filter as an optional field; unset filters are not sent
//! - **Typed responses** - features with geometry, properties and place hierarchy
//! - **Raw data preserved** - the raw body travels with both responses and errors
//! - **Rate limit metadata** - `X-Rate-Limit-*` headers on every response
//! - **Pluggable transport** - `reqwest` by default, any [`HttpTransport`] on demand
//! - **Pluggable logging** - static or per-call [`Logger`], plus `tracing` events
//! - **Buffer reuse** - request URIs are rendered into pooled buffers
//!
//! ## Error Handling
//!
//! ```no_run
//! use mapbox_geocoding::{Error, ForwardGeocodeRequest, Geocoder};
//!
//! # async fn example() -> Result<(), Error> {
//! # let geocoder = Geocoder::builder().build()?;
//! match geocoder.forward_geocode(&ForwardGeocodeRequest::new("Paris")).await {
//!     Ok(response) => println!("{} features", response.features.len()),
//!     Err(e) if e.is_rate_limited() => eprintln!("Quota exhausted: {}", e),
//!     Err(Error::DeserializationFailed { raw_response, source }) => {
//!         eprintln!("Unexpected body {}: {}", raw_response, source);
//!     }
//!     Err(e) => eprintln!("Geocoding failed: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
pub mod feature;
mod logger;
mod pool;
mod query;
pub mod rate_limit;
mod request;
mod response;
mod transport;

pub use client::Geocoder;
pub use config::{
    Config, GeocoderBuilder, ACCESS_TOKEN_ENV, DEFAULT_GEOCODE_ENDPOINT, DEFAULT_ROOT_API,
};
pub use error::{BoxError, Error, Result};
pub use feature::{Context, Feature, Geometry, Properties};
pub use logger::{Logger, LoggerResolver, TracingLogger};
pub use rate_limit::RateLimit;
pub use request::{ForwardGeocodeRequest, GeoPoint, ReverseGeocodeRequest, ReverseMode};
pub use response::{GeocodeQuery, GeocodeResponse};
pub use transport::{HttpTransport, ReqwestTransport, TransportRequest, TransportResponse};

//! The Mapbox geocoding client.
//!
//! [`Geocoder`] is the main entry point. Use [`GeocoderBuilder`] to configure
//! and create one.

use crate::{
    config::{GeocoderBuilder, PreparedConfig},
    logger::Logger,
    pool::BufferPool,
    query::{encode_values, write_coordinate, MultiQueryValues},
    rate_limit::RateLimit,
    request::{ForwardGeocodeRequest, ReverseGeocodeRequest},
    response::{GeocodeQuery, GeocodeResponse, RawGeocodeResponse},
    transport::{TransportRequest, TransportResponse},
    Error, GeoPoint, Result,
};
use http::{Extensions, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;

const RESPONSE_FORMAT_JSON: &str = ".json";

/// Client for the Mapbox geocoding v5 API.
///
/// Cheap to clone; clones share configuration, transport and buffer pool, and
/// may be used from many tasks at once.
///
/// # Examples
///
/// ```no_run
/// use mapbox_geocoding::{ForwardGeocodeRequest, Geocoder, GeoPoint, ReverseGeocodeRequest};
///
/// # async fn example() -> Result<(), mapbox_geocoding::Error> {
/// let geocoder = Geocoder::builder().access_token("pk.my-token").build()?;
///
/// let places = geocoder
///     .reverse_geocode(&ReverseGeocodeRequest::new(GeoPoint::new(-77.05, 38.889)))
///     .await?;
/// println!("{} features", places.features.len());
///
/// let matches = geocoder
///     .forward_geocode(&ForwardGeocodeRequest::new("Washington").with_limit(1))
///     .await?;
/// println!("tokens: {:?}", matches.forward_query());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Geocoder {
    inner: Arc<GeocoderInner>,
}

#[derive(Debug)]
struct GeocoderInner {
    config: PreparedConfig,
    buffers: BufferPool,
}

impl Geocoder {
    /// Creates a new `GeocoderBuilder` for configuring a geocoder.
    pub fn builder() -> GeocoderBuilder {
        GeocoderBuilder::new()
    }

    pub(crate) fn from_prepared(config: PreparedConfig) -> Self {
        Self {
            inner: Arc::new(GeocoderInner {
                config,
                buffers: BufferPool::default(),
            }),
        }
    }

    /// Looks up the places at a coordinate.
    pub async fn reverse_geocode(&self, request: &ReverseGeocodeRequest) -> Result<GeocodeResponse> {
        self.reverse_geocode_with_context(&Extensions::new(), request)
            .await
    }

    /// Like [`reverse_geocode`](Self::reverse_geocode), with request-scoped
    /// extensions handed to the configured logger resolver.
    pub async fn reverse_geocode_with_context(
        &self,
        context: &Extensions,
        request: &ReverseGeocodeRequest,
    ) -> Result<GeocodeResponse> {
        let (values, multi) = request.query_values();
        let config = &self.inner.config;

        let mut uri = self.inner.buffers.acquire();
        uri.clear();
        uri.push_str(&config.geocode_url);
        write_coordinate(&mut uri, request.point.lon);
        uri.push(',');
        write_coordinate(&mut uri, request.point.lat);
        uri.push_str(RESPONSE_FORMAT_JSON);
        uri.push_str(&config.access_token_query);
        encode_values(&mut uri, &values, &multi);

        let (response, rate_limit) = self.execute("reverse", context, &uri).await?;
        let raw: RawGeocodeResponse<Vec<f64>> = parse_body(&response.body)?;

        let point = match raw.query.as_slice() {
            [lon, lat] => GeoPoint::new(*lon, *lat),
            other => {
                tracing::error!(len = other.len(), "Unexpected reverse geocode query echo");
                return Err(Error::UnexpectedQueryLength {
                    len: other.len(),
                    raw_response: lossy(&response.body),
                });
            }
        };

        Ok(GeocodeResponse {
            rate_limit,
            raw_response: response.body,
            query: GeocodeQuery::Reverse(point),
            kind: raw.kind,
            attribution: raw.attribution,
            features: raw.features,
        })
    }

    /// Looks up the places matching a search text.
    pub async fn forward_geocode(&self, request: &ForwardGeocodeRequest) -> Result<GeocodeResponse> {
        self.forward_geocode_with_context(&Extensions::new(), request)
            .await
    }

    /// Like [`forward_geocode`](Self::forward_geocode), with request-scoped
    /// extensions handed to the configured logger resolver.
    pub async fn forward_geocode_with_context(
        &self,
        context: &Extensions,
        request: &ForwardGeocodeRequest,
    ) -> Result<GeocodeResponse> {
        let values = request.query_values();
        let config = &self.inner.config;

        let mut uri = self.inner.buffers.acquire();
        uri.clear();
        uri.push_str(&config.geocode_url);
        uri.push_str(&request.search_text);
        uri.push_str(RESPONSE_FORMAT_JSON);
        uri.push_str(&config.access_token_query);
        encode_values(&mut uri, &values, &MultiQueryValues::new());

        let (response, rate_limit) = self.execute("forward", context, &uri).await?;
        let raw: RawGeocodeResponse<Vec<String>> = parse_body(&response.body)?;

        Ok(GeocodeResponse {
            rate_limit,
            raw_response: response.body,
            query: GeocodeQuery::Forward(raw.query),
            kind: raw.kind,
            attribution: raw.attribution,
            features: raw.features,
        })
    }

    /// Sends a GET to `uri` and checks the status. The returned response owns
    /// its body.
    async fn execute(
        &self,
        operation: &'static str,
        context: &Extensions,
        uri: &str,
    ) -> Result<(TransportResponse, RateLimit)> {
        let config = &self.inner.config;

        config.loggers.with_logger(context, |logger: &dyn Logger| {
            logger.debug(format_args!("mapbox_geocoding: {} geocode request {}", operation, uri))
        });
        tracing::debug!(operation, "Executing geocode request");

        let response = config
            .transport
            .execute(TransportRequest {
                method: &Method::GET,
                uri,
            })
            .await
            .map_err(Error::Transport)?;

        config.loggers.with_logger(context, |logger: &dyn Logger| {
            logger.debug(format_args!(
                "mapbox_geocoding: {} geocode response {}",
                operation,
                String::from_utf8_lossy(&response.body)
            ))
        });

        let rate_limit = RateLimit::from_headers(&response.headers);

        if response.status != StatusCode::OK {
            let raw_response = lossy(&response.body);
            tracing::warn!(
                operation,
                status = response.status.as_u16(),
                response = %raw_response,
                "Geocode request failed"
            );
            return Err(Error::HttpError {
                uri: uri.to_string(),
                status: response.status,
                raw_response,
                rate_limit,
            });
        }

        Ok((response, rate_limit))
    }
}

fn parse_body<Q: DeserializeOwned>(body: &[u8]) -> Result<RawGeocodeResponse<Q>> {
    serde_json::from_slice(body).map_err(|source| {
        let raw_response = lossy(body);
        tracing::error!(
            error = %source,
            raw_response = %raw_response,
            "Failed to deserialize geocode response"
        );
        Error::DeserializationFailed {
            raw_response,
            source,
        }
    })
}

fn lossy(body: &[u8]) -> String {
    String::from_utf8_lossy(body).into_owned()
}

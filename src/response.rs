//! Geocoding responses.
//!
//! A [`GeocodeResponse`] keeps the parsed features next to the raw body and the
//! rate limit headers, so callers can debug exactly what the API returned.

use crate::feature::Feature;
use crate::rate_limit::RateLimit;
use crate::request::GeoPoint;
use serde::Deserialize;
use std::borrow::Cow;

/// The query the API echoed back.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeQuery {
    /// The coordinates of a reverse geocoding call.
    Reverse(GeoPoint),
    /// The tokens the API split a forward search text into.
    Forward(Vec<String>),
}

/// A successful geocoding call.
///
/// # Examples
///
/// ```no_run
/// use mapbox_geocoding::{Geocoder, GeoPoint, ReverseGeocodeRequest};
///
/// # async fn example() -> Result<(), mapbox_geocoding::Error> {
/// let geocoder = Geocoder::builder().build()?;
/// let response = geocoder
///     .reverse_geocode(&ReverseGeocodeRequest::new(GeoPoint::new(-77.05, 38.889)))
///     .await?;
///
/// if let Some(feature) = response.first() {
///     println!("{}", feature.place_name);
/// }
/// println!("quota: {:?}", response.rate_limit.limit_value());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GeocodeResponse {
    /// Rate limit headers of the response.
    pub rate_limit: RateLimit,

    /// The raw response body.
    pub raw_response: Vec<u8>,

    /// The query echoed by the API.
    pub query: GeocodeQuery,

    /// GeoJSON type of the body, normally `FeatureCollection`.
    pub kind: String,

    /// Attribution notice the API asks to display alongside results.
    pub attribution: Option<String>,

    /// Matching places, most relevant first.
    pub features: Vec<Feature>,
}

impl GeocodeResponse {
    /// The echoed coordinates, for reverse geocoding responses.
    pub fn reverse_query(&self) -> Option<GeoPoint> {
        match &self.query {
            GeocodeQuery::Reverse(point) => Some(*point),
            GeocodeQuery::Forward(_) => None,
        }
    }

    /// The echoed search tokens, for forward geocoding responses.
    pub fn forward_query(&self) -> Option<&[String]> {
        match &self.query {
            GeocodeQuery::Forward(tokens) => Some(tokens),
            GeocodeQuery::Reverse(_) => None,
        }
    }

    /// The raw body as text, with invalid UTF-8 replaced.
    pub fn raw_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw_response)
    }

    /// The most relevant feature, if any matched.
    pub fn first(&self) -> Option<&Feature> {
        self.features.first()
    }
}

/// Body of a geocoding response. `Q` is `Vec<f64>` for reverse calls and
/// `Vec<String>` for forward calls.
#[derive(Debug, Deserialize)]
pub(crate) struct RawGeocodeResponse<Q> {
    #[serde(rename = "type", default)]
    pub(crate) kind: String,
    pub(crate) query: Q,
    pub(crate) features: Vec<Feature>,
    #[serde(default)]
    pub(crate) attribution: Option<String>,
}

//! Typed geocoding requests.
//!
//! Every filter is optional. Filters left at their default (`None`, empty,
//! `false`, zero limit) are not sent, so the API applies its own defaults.

use crate::query::{join_coordinates, MultiQueryValues, QueryValues};
use std::borrow::Cow;

pub(crate) const LIMIT: &str = "limit";
pub(crate) const TYPES: &str = "types";
pub(crate) const COUNTRY: &str = "country";
pub(crate) const LANGUAGE: &str = "language";
pub(crate) const REVERSE_MODE: &str = "reverseMode";
pub(crate) const AUTOCOMPLETE: &str = "autocomplete";
pub(crate) const FUZZY_MATCH: &str = "fuzzyMatch";
pub(crate) const BBOX: &str = "bbox";
pub(crate) const PROXIMITY: &str = "proximity";
pub(crate) const ROUTING: &str = "routing";

/// A longitude/latitude pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// How results are sorted when a reverse request asks for more than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReverseMode {
    /// Closest feature first. The API default.
    Distance,
    /// High-prominence features may rank above nearer ones.
    Score,
}

impl ReverseMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ReverseMode::Distance => "distance",
            ReverseMode::Score => "score",
        }
    }
}

/// Parameters of a reverse geocoding call (coordinates to places).
///
/// # Examples
///
/// ```
/// use mapbox_geocoding::{GeoPoint, ReverseGeocodeRequest, ReverseMode};
///
/// let request = ReverseGeocodeRequest::new(GeoPoint::new(-77.05, 38.889))
///     .with_limit(3)
///     .with_types(["address"])
///     .with_reverse_mode(ReverseMode::Score);
/// assert_eq!(request.limit, Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReverseGeocodeRequest {
    pub point: GeoPoint,
    /// Maximum number of results. Only honoured by the API together with `types`.
    pub limit: Option<u32>,
    /// Feature types to include: country, region, postcode, district, place,
    /// locality, neighborhood, address or poi.
    pub types: Vec<String>,
    /// Comma-separated ISO 3166 alpha 2 country codes.
    pub country: Option<String>,
    /// Comma-separated IETF language tags.
    pub language: Option<String>,
    pub reverse_mode: Option<ReverseMode>,
    /// Ask for routable points of address features.
    pub routing: bool,
}

impl ReverseGeocodeRequest {
    pub fn new(point: GeoPoint) -> Self {
        Self {
            point,
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_reverse_mode(mut self, mode: ReverseMode) -> Self {
        self.reverse_mode = Some(mode);
        self
    }

    pub fn with_routing(mut self, routing: bool) -> Self {
        self.routing = routing;
        self
    }

    /// Collects the filters to send. A single type goes into `values`; several
    /// types are borrowed as one multi-value entry, each rendered as its own
    /// `types=` parameter.
    pub(crate) fn query_values(&self) -> (QueryValues<'_>, MultiQueryValues<'_>) {
        let mut values = QueryValues::with_capacity(6);
        let mut multi = MultiQueryValues::new();

        insert_common(&mut values, self.limit, &self.country, &self.language, self.routing);
        if let Some(mode) = self.reverse_mode {
            values.insert(REVERSE_MODE, Cow::Borrowed(mode.as_str()));
        }
        match self.types.as_slice() {
            [] => {}
            [single] => {
                values.insert(TYPES, Cow::Borrowed(single.as_str()));
            }
            many => {
                multi.insert(TYPES, many);
            }
        }

        (values, multi)
    }
}

/// Parameters of a forward geocoding call (text to places).
///
/// # Examples
///
/// ```
/// use mapbox_geocoding::{ForwardGeocodeRequest, GeoPoint};
///
/// let request = ForwardGeocodeRequest::new("Washington")
///     .with_autocomplete(false)
///     .with_proximity(GeoPoint::new(-77.03, 38.9));
/// assert!(!request.autocomplete());
/// assert!(request.fuzzy_match());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForwardGeocodeRequest {
    /// The text to look up. Written into the URI path as is, so it must
    /// already be URL-safe and must not contain `;`.
    pub search_text: String,
    /// Return results that start with the search text. `None` means the API
    /// default, which is `true`.
    pub autocomplete: Option<bool>,
    /// `[minLon, minLat, maxLon, maxLat]`; must not cross the 180th meridian.
    pub bbox: Option<[f64; 4]>,
    /// Comma-separated ISO 3166 alpha 2 country codes.
    pub country: Option<String>,
    /// Allow approximate matching. `None` means the API default, which is `true`.
    pub fuzzy_match: Option<bool>,
    /// Comma-separated IETF language tags.
    pub language: Option<String>,
    /// Maximum number of results (API default 5, maximum 10).
    pub limit: Option<u32>,
    /// Bias results towards this location.
    pub proximity: Option<GeoPoint>,
    /// Ask for routable points of address features.
    pub routing: bool,
    pub types: Vec<String>,
}

impl ForwardGeocodeRequest {
    pub fn new(search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            ..Default::default()
        }
    }

    /// Effective autocomplete setting.
    pub fn autocomplete(&self) -> bool {
        self.autocomplete.unwrap_or(true)
    }

    /// Effective fuzzy matching setting.
    pub fn fuzzy_match(&self) -> bool {
        self.fuzzy_match.unwrap_or(true)
    }

    pub fn with_autocomplete(mut self, autocomplete: bool) -> Self {
        self.autocomplete = Some(autocomplete);
        self
    }

    pub fn with_bbox(mut self, min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        self.bbox = Some([min_lon, min_lat, max_lon, max_lat]);
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_fuzzy_match(mut self, fuzzy_match: bool) -> Self {
        self.fuzzy_match = Some(fuzzy_match);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_proximity(mut self, point: GeoPoint) -> Self {
        self.proximity = Some(point);
        self
    }

    pub fn with_routing(mut self, routing: bool) -> Self {
        self.routing = routing;
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Collects the filters to send. Types are always comma-joined.
    pub(crate) fn query_values(&self) -> QueryValues<'_> {
        let mut values = QueryValues::with_capacity(9);

        insert_common(&mut values, self.limit, &self.country, &self.language, self.routing);
        if let Some(autocomplete) = self.autocomplete {
            values.insert(AUTOCOMPLETE, bool_str(autocomplete));
        }
        if let Some(fuzzy_match) = self.fuzzy_match {
            values.insert(FUZZY_MATCH, bool_str(fuzzy_match));
        }
        if let Some(bbox) = &self.bbox {
            values.insert(BBOX, Cow::Owned(join_coordinates(bbox)));
        }
        if let Some(point) = self.proximity {
            values.insert(PROXIMITY, Cow::Owned(join_coordinates(&[point.lon, point.lat])));
        }
        if !self.types.is_empty() {
            values.insert(TYPES, Cow::Owned(self.types.join(",")));
        }

        values
    }
}

fn insert_common<'a>(
    values: &mut QueryValues<'a>,
    limit: Option<u32>,
    country: &'a Option<String>,
    language: &'a Option<String>,
    routing: bool,
) {
    if let Some(limit) = limit.filter(|l| *l > 0) {
        values.insert(LIMIT, Cow::Owned(limit.to_string()));
    }
    if let Some(country) = country.as_deref().filter(|c| !c.is_empty()) {
        values.insert(COUNTRY, Cow::Borrowed(country));
    }
    if let Some(language) = language.as_deref().filter(|l| !l.is_empty()) {
        values.insert(LANGUAGE, Cow::Borrowed(language));
    }
    if routing {
        values.insert(ROUTING, Cow::Borrowed("true"));
    }
}

fn bool_str(value: bool) -> Cow<'static, str> {
    Cow::Borrowed(if value { "true" } else { "false" })
}

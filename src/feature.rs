//! The place records returned by the geocoding API.
//!
//! These mirror the GeoJSON features of a Mapbox geocoding response. Fields
//! the API omits for a given feature fall back to their defaults.

use serde::{Deserialize, Serialize};

/// A single place returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    /// Feature id, e.g. `address.6707678235122794`.
    pub id: String,
    /// GeoJSON type, always `Feature`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Place types this feature belongs to (`address`, `place`, `country`, ...).
    pub place_type: Vec<String>,
    /// How well the feature matches the query, from 0 to 1.
    pub relevance: f64,
    pub properties: Properties,
    /// Name of the feature in the requested language.
    pub text: String,
    /// Full human-readable name including the place hierarchy.
    pub place_name: String,
    /// `[lon, lat]` of the feature's center.
    pub center: Vec<f64>,
    pub geometry: Geometry,
    /// House number, for address features.
    pub address: Option<String>,
    /// `[minLon, minLat, maxLon, maxLat]` for features with an extent.
    pub bbox: Option<[f64; 4]>,
    /// Parent features, from the most to the least specific.
    pub context: Vec<Context>,
}

impl Feature {
    /// Returns the first entry of the context hierarchy whose id has the given
    /// type prefix, e.g. `"region"` or `"country"`.
    pub fn context_of(&self, place_type: &str) -> Option<&Context> {
        self.context.iter().find(|c| {
            c.id
                .split_once('.')
                .is_some_and(|(prefix, _)| prefix == place_type)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Properties {
    pub accuracy: Option<String>,
    pub short_code: Option<String>,
    pub wikidata: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

/// One level of a feature's place hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    pub id: String,
    pub text: String,
    pub wikidata: Option<String>,
    pub short_code: Option<String>,
}

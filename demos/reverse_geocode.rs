//! Reverse geocoding: coordinates to places.
//!
//! This example shows how to:
//! - Create a geocoder from `MAPBOX_ACCESS_TOKEN`
//! - Narrow a reverse request with filters
//! - Walk a feature's place hierarchy
//! - Read the rate limit headers
//!
//! Run with: `MAPBOX_ACCESS_TOKEN=pk... cargo run --example reverse_geocode`

use mapbox_geocoding::{Error, GeoPoint, Geocoder, ReverseGeocodeRequest, TracingLogger};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("mapbox_geocoding=debug,reverse_geocode=info")
        .init();

    let geocoder = Geocoder::builder()
        .logger(Arc::new(TracingLogger))
        .build()?;

    // The Lincoln Memorial
    let request = ReverseGeocodeRequest::new(GeoPoint::new(-77.0501629, 38.8892227))
        .with_language("en")
        .with_types(["address", "place", "country"]);
    let response = geocoder.reverse_geocode(&request).await?;

    println!("Mapbox echoed {:?}", response.reverse_query());
    for feature in &response.features {
        println!("{} [{}]", feature.place_name, feature.place_type.join(","));
        for context in &feature.context {
            println!("  {} {}", context.id, context.text);
        }
    }

    println!();
    println!("Requests per window: {:?}", response.rate_limit.limit_value());
    println!("Window: {:?}", response.rate_limit.interval_duration());
    println!("Resets at: {:?}", response.rate_limit.reset_at());

    Ok(())
}

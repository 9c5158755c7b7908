//! Forward geocoding: search text to places.
//!
//! This example shows how to:
//! - Bias results with a proximity point and a bounding box
//! - Turn autocomplete off for exact lookups
//! - Attach per-call logging through request extensions
//!
//! Run with: `MAPBOX_ACCESS_TOKEN=pk... cargo run --example forward_geocode`

use http::Extensions;
use mapbox_geocoding::{ForwardGeocodeRequest, GeoPoint, Geocoder, Logger, TracingLogger};
use std::sync::Arc;

/// Marks calls whose traces should be logged.
#[derive(Clone)]
struct Verbose;

#[tokio::main]
async fn main() -> Result<(), mapbox_geocoding::Error> {
    tracing_subscriber::fmt()
        .with_env_filter("mapbox_geocoding=debug,forward_geocode=info")
        .init();

    let geocoder = Geocoder::builder()
        .request_logger(|context: &Extensions| {
            context
                .get::<Verbose>()
                .map(|_| Arc::new(TracingLogger) as Arc<dyn Logger>)
        })
        .build()?;

    let request = ForwardGeocodeRequest::new("Washington")
        .with_autocomplete(false)
        .with_proximity(GeoPoint::new(-77.03, 38.9))
        .with_bbox(-77.2, 38.7, -76.9, 39.0)
        .with_limit(3);

    let mut context = Extensions::new();
    context.insert(Verbose);
    let response = geocoder
        .forward_geocode_with_context(&context, &request)
        .await?;

    println!("Tokens: {:?}", response.forward_query());
    for feature in &response.features {
        println!(
            "{:.2} {} at {:?}",
            feature.relevance, feature.place_name, feature.center
        );
    }
    if let Some(attribution) = &response.attribution {
        println!("{}", attribution);
    }

    Ok(())
}

//! Example demonstrating error handling.
//!
//! This example shows how to:
//! - Tell transport failures from API errors
//! - Access the raw response body on errors
//! - Recognise an exhausted quota
//!
//! Run with: `cargo run --example error_handling`

use mapbox_geocoding::{Error, GeoPoint, Geocoder, ReqwestTransport, ReverseGeocodeRequest};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("mapbox_geocoding=info")
        .init();

    println!("=== Example 1: Invalid access token ===");
    let geocoder = Geocoder::builder()
        .access_token("pk.invalid")
        .build_with_env(|_| None)?;
    let request = ReverseGeocodeRequest::new(GeoPoint::new(2.3522, 48.8566));

    match geocoder.reverse_geocode(&request).await {
        Ok(response) => println!("Unexpected success: {} features", response.features.len()),
        Err(Error::HttpError {
            status,
            raw_response,
            ..
        }) => {
            println!("HTTP Error!");
            println!("  Status: {}", status);
            println!("  Raw response: {}", raw_response);
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 2: Transport failures ===");
    let geocoder = Geocoder::builder()
        .root_api("http://127.0.0.1:9")?
        .transport(Arc::new(ReqwestTransport::with_timeout(
            Duration::from_secs(2),
        )?))
        .build()?;

    match geocoder.reverse_geocode(&request).await {
        Ok(_) => println!("Unexpected success"),
        Err(Error::Transport(source)) => println!("Transport failed: {}", source),
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 3: Rate limits ===");
    let geocoder = Geocoder::builder().build()?;
    for _ in 0..3 {
        match geocoder.reverse_geocode(&request).await {
            Ok(response) => println!(
                "ok, limit {:?} per {:?}",
                response.rate_limit.limit_value(),
                response.rate_limit.interval_duration()
            ),
            Err(e) if e.is_rate_limited() => {
                println!("Quota exhausted: {}", e.raw_response().unwrap_or_default());
                if let Some(reset) = e.rate_limit().and_then(|r| r.reset_at()) {
                    println!("  Quota resets at {:?}", reset);
                }
                break;
            }
            Err(e) => println!("Error: {}", e),
        }
    }

    Ok(())
}

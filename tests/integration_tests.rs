//! Integration tests using wiremock to simulate the Mapbox API.

use mapbox_geocoding::{
    Error, ForwardGeocodeRequest, GeoPoint, Geocoder, Logger, ReqwestTransport,
    ReverseGeocodeRequest,
};
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, UNIX_EPOCH};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REVERSE_BODY: &str = r#"{"type":"FeatureCollection","query":[-77.05,38.889],"features":[{"id":"address.6707678235122794","type":"Feature","place_type":["address"],"relevance":1,"properties":{"accuracy":"rooftop"},"text":"Lincoln Memorial Circle SW","place_name":"2 Lincoln Memorial Circle SW, Washington, District of Columbia 20024, United States","center":[-77.0501629,38.8892227],"geometry":{"type":"Point","coordinates":[-77.0501629,38.8892227]},"address":"2","context":[{"id":"neighborhood.295198","text":"National Mall"},{"id":"postcode.4419139247733840","text":"20024"},{"id":"place.7673410831246050","wikidata":"Q61","text":"Washington"},{"id":"region.1753213251667470","short_code":"US-DC","wikidata":"Q3551781","text":"District of Columbia"},{"id":"country.9053006287256050","short_code":"us","wikidata":"Q30","text":"United States"}]},{"id":"neighborhood.295198","type":"Feature","place_type":["neighborhood"],"relevance":1,"properties":{},"text":"National Mall","place_name":"National Mall, Washington, District of Columbia 20024, United States","bbox":[-77.056852,38.8788473,-77.0140495,38.893034],"center":[-77.02,38.89],"geometry":{"type":"Point","coordinates":[-77.02,38.89]},"context":[{"id":"postcode.4419139247733840","text":"20024"},{"id":"place.7673410831246050","wikidata":"Q61","text":"Washington"},{"id":"region.1753213251667470","short_code":"US-DC","wikidata":"Q3551781","text":"District of Columbia"},{"id":"country.9053006287256050","short_code":"us","wikidata":"Q30","text":"United States"}]},{"id":"country.9053006287256050","type":"Feature","place_type":["country"],"relevance":1,"properties":{"short_code":"us","wikidata":"Q30"},"text":"United States","place_name":"United States","bbox":[-179.9,18.765563,-66.885444,71.540724],"center":[-100,40],"geometry":{"type":"Point","coordinates":[-100,40]}}],"attribution":"NOTICE: © 2020 Mapbox and its suppliers. All rights reserved."}"#;

const FORWARD_BODY: &str = r#"{"type":"FeatureCollection","query":["washington"],"features":[{"id":"place.7673410831246050","type":"Feature","place_type":["place"],"relevance":1,"properties":{"wikidata":"Q61"},"text":"Washington","place_name":"Washington, District of Columbia, United States","bbox":[-77.1197609567342,38.79155738,-76.909391,38.99555093],"center":[-77.0366,38.895],"geometry":{"type":"Point","coordinates":[-77.0366,38.895]},"context":[{"id":"region.1753213251667470","short_code":"US-DC","wikidata":"Q3551781","text":"District of Columbia"},{"id":"country.9053006287256050","short_code":"us","wikidata":"Q30","text":"United States"}]}],"attribution":"NOTICE"}"#;

fn geocoder(server: &MockServer) -> Geocoder {
    Geocoder::builder()
        .access_token("pk.test")
        .root_api(server.uri())
        .unwrap()
        .build_with_env(|_| None)
        .unwrap()
}

#[tokio::test]
async fn test_reverse_geocode() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/geocoding/v5/mapbox.places/-77.050163,38.889223.json",
        ))
        .and(query_param("access_token", "pk.test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(REVERSE_BODY)
                .insert_header("X-Rate-Limit-Interval", "60")
                .insert_header("X-Rate-Limit-Limit", "600")
                .insert_header("X-Rate-Limit-Reset", "1593190800"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let geocoder = geocoder(&mock_server);
    let request = ReverseGeocodeRequest::new(GeoPoint::new(-77.0501629, 38.8892227));
    let response = geocoder.reverse_geocode(&request).await.unwrap();

    assert_eq!(response.reverse_query(), Some(GeoPoint::new(-77.05, 38.889)));
    assert_eq!(response.features.len(), 3);
    assert_eq!(response.raw_response, REVERSE_BODY.as_bytes());

    let address = &response.features[0];
    assert_eq!(address.place_type, vec!["address"]);
    assert_eq!(address.address.as_deref(), Some("2"));
    assert_eq!(
        address.context_of("region").and_then(|c| c.short_code.as_deref()),
        Some("US-DC")
    );

    assert_eq!(response.rate_limit.interval, b"60");
    assert_eq!(response.rate_limit.limit_value(), Some(600));
    assert_eq!(
        response.rate_limit.interval_duration(),
        Some(Duration::from_secs(60))
    );
    assert!(response.rate_limit.reset_at().is_some());
}

#[tokio::test]
async fn test_reverse_geocode_sends_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/v5/mapbox.places/2.350000,48.850000.json"))
        .and(query_param("access_token", "pk.test"))
        .and(query_param("limit", "2"))
        .and(query_param("language", "fr"))
        .and(query_param("types", "address"))
        .and(query_param("country", "fr"))
        .respond_with(ResponseTemplate::new(200).set_body_string(REVERSE_BODY))
        .expect(1)
        .mount(&mock_server)
        .await;

    let geocoder = geocoder(&mock_server);
    let request = ReverseGeocodeRequest::new(GeoPoint::new(2.35, 48.85))
        .with_limit(2)
        .with_language("fr")
        .with_country("fr")
        .with_types(["address"]);

    geocoder.reverse_geocode(&request).await.unwrap();
}

#[tokio::test]
async fn test_custom_geocode_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/geocoding/v5/mapbox.places-permanent/1.000000,2.000000.json",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(REVERSE_BODY))
        .expect(1)
        .mount(&mock_server)
        .await;

    let geocoder = Geocoder::builder()
        .root_api(mock_server.uri())
        .unwrap()
        .geocode_endpoint("mapbox.places-permanent")
        .build_with_env(|_| None)
        .unwrap();

    geocoder
        .reverse_geocode(&ReverseGeocodeRequest::new(GeoPoint::new(1.0, 2.0)))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_env_token_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("access_token", "pk.from-env"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FORWARD_BODY))
        .expect(1)
        .mount(&mock_server)
        .await;

    let geocoder = Geocoder::builder()
        .access_token("pk.explicit")
        .root_api(mock_server.uri())
        .unwrap()
        .build_with_env(|name| (name == "MAPBOX_ACCESS_TOKEN").then(|| "pk.from-env".to_string()))
        .unwrap();

    geocoder
        .forward_geocode(&ForwardGeocodeRequest::new("Washington"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_forward_geocode() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/v5/mapbox.places/Washington.json"))
        .and(query_param("access_token", "pk.test"))
        .and(query_param("autocomplete", "false"))
        .and(query_param("bbox", "-77.200000,38.700000,-76.900000,39.000000"))
        .and(query_param("proximity", "-77.036600,38.895000"))
        .and(query_param("types", "place,region"))
        .and(query_param("routing", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FORWARD_BODY))
        .expect(1)
        .mount(&mock_server)
        .await;

    let geocoder = geocoder(&mock_server);
    let request = ForwardGeocodeRequest::new("Washington")
        .with_autocomplete(false)
        .with_bbox(-77.2, 38.7, -76.9, 39.0)
        .with_proximity(GeoPoint::new(-77.0366, 38.895))
        .with_types(["place", "region"])
        .with_routing(true);
    let response = geocoder.forward_geocode(&request).await.unwrap();

    assert_eq!(response.forward_query(), Some(&["washington".to_string()][..]));
    assert!(response.reverse_query().is_none());
    assert_eq!(response.features.len(), 1);
    assert_eq!(response.features[0].text, "Washington");
    assert_eq!(response.features[0].properties.wikidata.as_deref(), Some("Q61"));
    assert!(response.rate_limit.is_empty());
}

#[tokio::test]
async fn test_rate_limited_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_string(r#"{"message":"Too Many Requests"}"#)
                .insert_header("X-Rate-Limit-Interval", "60")
                .insert_header("X-Rate-Limit-Limit", "600")
                .insert_header("X-Rate-Limit-Reset", "1593190800"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let geocoder = geocoder(&mock_server);
    let result = geocoder
        .reverse_geocode(&ReverseGeocodeRequest::new(GeoPoint::new(1.0, 2.0)))
        .await;

    match &result {
        Err(err @ Error::HttpError {
            uri,
            status,
            raw_response,
            rate_limit,
        }) => {
            assert_eq!(status.as_u16(), 429);
            assert_eq!(rate_limit.limit_value(), Some(600));
            assert_eq!(rate_limit.interval_duration(), Some(Duration::from_secs(60)));
            assert_eq!(
                rate_limit.reset_at(),
                Some(UNIX_EPOCH + Duration::from_secs(1_593_190_800))
            );
            assert_eq!(err.rate_limit(), Some(rate_limit));
            assert_eq!(raw_response, r#"{"message":"Too Many Requests"}"#);
            assert!(uri.ends_with("/1.000000,2.000000.json?access_token=pk.test"));
            assert!(err.is_rate_limited());
            assert!(err.to_string().contains("429"));
            assert!(err.to_string().contains("Too Many Requests"));
        }
        _ => panic!("Expected HttpError, got {:?}", result),
    }
}

#[tokio::test]
async fn test_deserialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("invalid json"))
        .mount(&mock_server)
        .await;

    let geocoder = geocoder(&mock_server);
    let result = geocoder
        .forward_geocode(&ForwardGeocodeRequest::new("Washington"))
        .await;

    match result {
        Err(Error::DeserializationFailed {
            raw_response,
            source,
        }) => {
            assert_eq!(raw_response, "invalid json");
            assert!(source.is_syntax());
        }
        _ => panic!("Expected DeserializationFailed, got {:?}", result),
    }
}

#[tokio::test]
async fn test_reverse_query_must_be_a_pair() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"query":[1.0],"features":[]}"#),
        )
        .mount(&mock_server)
        .await;

    let geocoder = geocoder(&mock_server);
    let err = geocoder
        .reverse_geocode(&ReverseGeocodeRequest::new(GeoPoint::new(1.0, 2.0)))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("unexpected len of query coordinates"));
    assert_eq!(err.raw_response(), Some(r#"{"query":[1.0],"features":[]}"#));
}

#[tokio::test]
async fn test_transport_timeout_is_passed_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(REVERSE_BODY)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let geocoder = Geocoder::builder()
        .root_api(mock_server.uri())
        .unwrap()
        .transport(Arc::new(
            ReqwestTransport::with_timeout(Duration::from_millis(100)).unwrap(),
        ))
        .build_with_env(|_| None)
        .unwrap();

    let err = geocoder
        .reverse_geocode(&ReverseGeocodeRequest::new(GeoPoint::new(1.0, 2.0)))
        .await
        .unwrap_err();

    match err {
        Error::Transport(source) => {
            let reqwest_error = source
                .downcast_ref::<reqwest::Error>()
                .expect("transport error should be a reqwest error");
            assert!(reqwest_error.is_timeout());
        }
        other => panic!("Expected Transport error, got {:?}", other),
    }
}

#[derive(Default)]
struct CollectingLogger {
    lines: Mutex<Vec<String>>,
}

impl Logger for CollectingLogger {
    fn debug(&self, message: fmt::Arguments<'_>) {
        self.lines.lock().unwrap().push(message.to_string());
    }
}

#[tokio::test]
async fn test_logger_sees_uri_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FORWARD_BODY))
        .mount(&mock_server)
        .await;

    let logger = Arc::new(CollectingLogger::default());
    let geocoder = Geocoder::builder()
        .access_token("pk.test")
        .root_api(mock_server.uri())
        .unwrap()
        .logger(logger.clone())
        .build_with_env(|_| None)
        .unwrap();

    geocoder
        .forward_geocode(&ForwardGeocodeRequest::new("Washington"))
        .await
        .unwrap();

    let lines = logger.lines.lock().unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(&format!(
        "{}/geocoding/v5/mapbox.places/Washington.json?access_token=pk.test",
        mock_server.uri()
    )));
    assert!(lines[1].contains(FORWARD_BODY));
}

#[tokio::test]
async fn test_concurrent_calls_share_one_geocoder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(REVERSE_BODY))
        .expect(32)
        .mount(&mock_server)
        .await;

    let geocoder = geocoder(&mock_server);
    let tasks: Vec<_> = (0..32u32)
        .map(|i| {
            let geocoder = geocoder.clone();
            tokio::spawn(async move {
                let request =
                    ReverseGeocodeRequest::new(GeoPoint::new(f64::from(i), f64::from(i) / 2.0));
                geocoder.reverse_geocode(&request).await
            })
        })
        .collect();

    for task in tasks {
        let response = task.await.unwrap().unwrap();
        assert_eq!(response.features.len(), 3);
    }

    let mut paths: Vec<String> = mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 32);
}

//! Integration tests for IpGeolocator using wiremock.

use std::time::Duration;

use skywatch_core::{Coordinate, Geolocator, IpGeolocator, LocationError, PositionOptions};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn success_yields_coordinate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 19.5,
            "lon": 73.0,
            "city": "Bhiwandi"
        })))
        .mount(&mock_server)
        .await;

    let geo = IpGeolocator::with_base_url(mock_server.uri());
    let pos = geo.current_position(&PositionOptions::default()).await.unwrap();

    assert_eq!(pos, Coordinate::new(19.5, 73.0));
}

#[tokio::test]
async fn fail_status_is_unavailable_with_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "reserved range"
        })))
        .mount(&mock_server)
        .await;

    let geo = IpGeolocator::with_base_url(mock_server.uri());
    let err = geo.current_position(&PositionOptions::default()).await.unwrap_err();

    assert_eq!(err, LocationError::Unavailable("reserved range".into()));
}

#[tokio::test]
async fn forbidden_is_denied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let geo = IpGeolocator::with_base_url(mock_server.uri());
    let err = geo.current_position(&PositionOptions::default()).await.unwrap_err();

    assert_eq!(err, LocationError::Denied);
}

#[tokio::test]
async fn slow_service_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(2))
                .set_body_json(serde_json::json!({ "status": "success", "lat": 1.0, "lon": 2.0 })),
        )
        .mount(&mock_server)
        .await;

    let options = PositionOptions {
        timeout: Duration::from_millis(100),
        ..PositionOptions::default()
    };

    let geo = IpGeolocator::with_base_url(mock_server.uri());
    let err = geo.current_position(&options).await.unwrap_err();

    assert_eq!(err, LocationError::Timeout);
}

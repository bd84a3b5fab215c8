//! Integration tests for the resolver client (wiremock-based)

use chrono::NaiveDate;
use domain::{DateWindow, GeoPoint};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_trainmap::{
    DATASET_HEADER, HttpTrainmapClient, ResolverConfig, ResolverError, TrainmapClient,
};

fn client_for(server: &MockServer) -> HttpTrainmapClient {
    HttpTrainmapClient::new(&ResolverConfig::for_testing(&server.uri()), None).unwrap()
}

fn sample_trip_json() -> serde_json::Value {
    json!({
        "feed_id": "SNCF",
        "trip_id": "TRIP123",
        "route_id": "R1",
        "service_id": "WEEKDAY",
        "headsign": "Lyon Part-Dieu",
        "stop_times": [{
            "feed_id": "SNCF",
            "trip_id": "TRIP123",
            "stop_id": "PARIS",
            "stop_sequence": 1,
            "arrival_time": "08:00:00",
            "departure_time": "08:02:00"
        }]
    })
}

#[tokio::test]
async fn test_get_trip_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trips/SNCF/TRIP123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_trip_json()))
        .expect(1)
        .mount(&server)
        .await;

    let trip = client_for(&server).get_trip("SNCF", "TRIP123").await.unwrap();
    assert_eq!(trip.trip_id, "TRIP123");
    assert_eq!(trip.headsign.as_deref(), Some("Lyon Part-Dieu"));
    assert_eq!(trip.stop_times.len(), 1);
    assert_eq!(trip.stop_times[0].departure_time, "08:02:00");
}

#[tokio::test]
async fn test_not_found_carries_resolver_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trips/SNCF/NOPE"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "record not found" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).get_trip("SNCF", "NOPE").await.unwrap_err();
    match err {
        ResolverError::NotFound(message) => assert_eq!(message, "record not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_maps_to_request_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feeds"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "database is locked" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).get_feeds().await.unwrap_err();
    match err {
        ResolverError::RequestFailed { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database is locked");
        },
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stops/SNCF/PARIS"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_stop("SNCF", "PARIS").await.unwrap_err();
    assert!(matches!(err, ResolverError::ParseError(_)));
}

#[tokio::test]
async fn test_dataset_header_is_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feeds/SNCF"))
        .and(header(DATASET_HEADER, "/var/lib/trainmap/gtfs.db"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feed_id": "SNCF",
            "display_name": "SNCF Voyageurs"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpTrainmapClient::new(
        &ResolverConfig::for_testing(&server.uri()),
        Some("/var/lib/trainmap/gtfs.db".to_string()),
    )
    .unwrap();

    let feed = client.get_feed("SNCF").await.unwrap();
    assert_eq!(feed.display_name, "SNCF Voyageurs");
    assert!(feed.publisher_name.is_none());
}

#[tokio::test]
async fn test_keys_are_percent_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stoptimes/SNCF/StopArea:OCE%2087"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let stop_times = client_for(&server)
        .get_stop_times_at_stop("SNCF", "StopArea:OCE 87")
        .await
        .unwrap();
    assert!(stop_times.is_empty());
}

#[tokio::test]
async fn test_route_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/routes/SNCF/R1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feed_id": "SNCF",
            "route_id": "R1",
            "short_name": "TGV",
            "long_name": "Paris - Lyon",
            "route_type": 2
        })))
        .mount(&server)
        .await;

    let route = client_for(&server).get_route("SNCF", "R1").await.unwrap();
    assert_eq!(route.route_type, 2);
    assert_eq!(route.long_name, "Paris - Lyon");
}

#[tokio::test]
async fn test_aboard_search_posts_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sights/aboard"))
        .and(body_partial_json(json!({
            "date": "2024-06-01",
            "lateness_seconds": 120,
            "trip": { "trip_id": "TRIP123" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sights": [{
                "timestamp": "2024-06-01T08:30:00Z",
                "trip": sample_trip_json(),
                "observer_position": { "lat": 47.0, "lon": 4.0 },
                "sighted_position": { "lat": 47.01, "lon": 4.02 }
            }],
            "trip": sample_trip_json()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let trip = serde_json::from_value(sample_trip_json()).unwrap();
    let sights = client
        .get_sights_from_trip(&trip, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 120)
        .await
        .unwrap();

    assert_eq!(sights.trip.trip_id, "TRIP123");
    assert_eq!(sights.sights.len(), 1);
    assert!((sights.sights[0].sighted_position.lon - 4.02).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_point_search_sends_window() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sights/point"))
        .and(query_param("lat", "48.85"))
        .and(query_param("lon", "2.35"))
        .and(query_param("start", "2024-06-01"))
        .and(query_param("end", "2024-06-03"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "timestamp": "2024-06-01T10:15:00Z",
            "trip": sample_trip_json()
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let window = DateWindow::forward(2, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()).unwrap();
    let sights = client_for(&server)
        .get_real_train_sights(GeoPoint::new(48.85, 2.35), window)
        .await
        .unwrap();

    assert_eq!(sights.len(), 1);
    assert!(sights[0].stop_before.is_none());
    assert_eq!(sights[0].trip.feed_id, "SNCF");
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(client_for(&server).is_healthy().await);
}

#[tokio::test]
async fn test_health_check_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert!(!client_for(&server).is_healthy().await);
}

#[tokio::test]
async fn test_unreachable_resolver() {
    let config = ResolverConfig::for_testing("http://127.0.0.1:1");
    let client = HttpTrainmapClient::new(&config, None).unwrap();

    let err = client.get_feeds().await.unwrap_err();
    assert!(matches!(err, ResolverError::ConnectionFailed(_)));
    assert!(!client.is_healthy().await);
}

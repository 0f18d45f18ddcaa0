//! Integration tests for `DeliveryApiClient` using wiremock HTTP mocks.

use pickpoint_api::{ApiError, CostRequest, DeliveryApiClient};
use pickpoint_core::{Coordinates, Destination, OrderMetrics};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> DeliveryApiClient {
    DeliveryApiClient::new(base_url, 30).expect("client construction should not fail")
}

#[tokio::test]
async fn list_points_returns_parsed_listing() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "points": [
            {
                "id": "100",
                "name": "Pickup point on Tverskaya",
                "latitude": 55.76,
                "longitude": 37.61,
                "address": {"full": "Moscow, Tverskaya st, 12"},
                "phone": "+7 495 000-00-00",
                "work_time": [
                    {"days": [1, 2, 3, 4, 5], "time_from": "09:00", "time_to": "18:00"}
                ],
                "dayoffs": ["2026-01-01"]
            },
            {
                "id": "205",
                "name": "Parcel locker",
                "latitude": 55.70,
                "longitude": 37.50
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/delivery/points"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let listings = client.list_points().await.expect("should parse listing");

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].id, "100");
    assert_eq!(listings[0].work_time.len(), 1);
    assert!(listings[1].address.is_none());

    let point = listings[0].clone().into_point();
    assert_eq!(point.id, "pt-100");
    assert_eq!(point.schedule, "Mon-Fri 09:00-18:00");
    assert_eq!(point.dayoffs, "01.01.2026");
}

#[tokio::test]
async fn list_points_surfaces_error_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/delivery/points"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "listing offline"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.list_points().await;
    assert!(matches!(result, Err(ApiError::Api(ref msg)) if msg == "listing offline"));
}

#[tokio::test]
async fn reverse_geocode_sends_coordinates_as_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/reverse"))
        .and(query_param("latitude", "55.76"))
        .and(query_param("longitude", "37.61"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"address": "Moscow, Tverskaya st, 12"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let address = client
        .reverse_geocode(Coordinates::new(55.76, 37.61))
        .await
        .expect("should resolve address");

    assert_eq!(address, "Moscow, Tverskaya st, 12");
}

#[tokio::test]
async fn check_availability_posts_destination_descriptor() {
    let server = MockServer::start().await;

    let destination = Destination::SelfPickup {
        code: "100".to_owned(),
    };

    Mock::given(method("POST"))
        .and(path("/delivery/availability"))
        .and(body_json(
            serde_json::json!({"deliveryMode": "self_pickup", "code": "100"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "deliverable": true,
            "nearest": {"price_rub": 400.0}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let availability = client
        .check_availability(&destination)
        .await
        .expect("should parse availability");

    assert!(availability.deliverable);
    assert_eq!(availability.cost_hint(), Some(400.0));
}

#[tokio::test]
async fn check_availability_propagates_http_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/delivery/availability"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let destination = Destination::SelfPickup {
        code: "100".to_owned(),
    };
    let result = client.check_availability(&destination).await;
    assert!(matches!(result, Err(ApiError::Http(_))));
}

#[tokio::test]
async fn calculate_cost_returns_opaque_payload() {
    let server = MockServer::start().await;

    let calculation = serde_json::json!({"cost": 250.0, "currency": "RUB", "period": "1-3"});
    Mock::given(method("POST"))
        .and(path("/delivery/calculate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&calculation))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let destination = Destination::TimeInterval {
        address: "Arbat, 1".to_owned(),
        coordinates: Coordinates::new(55.75, 37.59),
    };
    let metrics = OrderMetrics::default();
    let value = client
        .calculate_cost(&CostRequest::new(&destination, &metrics))
        .await
        .expect("should return calculation");

    assert_eq!(value, calculation);
}

#[tokio::test]
async fn calculate_cost_surfaces_error_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/delivery/calculate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({"error": {"message": "tariff not found"}}),
        ))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let destination = Destination::SelfPickup {
        code: "9000".to_owned(),
    };
    let metrics = OrderMetrics::default();
    let result = client
        .calculate_cost(&CostRequest::new(&destination, &metrics))
        .await;
    assert!(matches!(result, Err(ApiError::Api(ref msg)) if msg == "tariff not found"));
}

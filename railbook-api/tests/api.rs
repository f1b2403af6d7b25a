use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use railbook_api::{app, AppState};
use railbook_catalog::{FareCalculator, StationDirectory, TrainCatalog};
use railbook_ledger::BookingLedger;
use railbook_store::MemoryBookingRepository;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    let state = AppState {
        stations: Arc::new(StationDirectory::seeded()),
        catalog: Arc::new(TrainCatalog::seeded()),
        fare: Arc::new(FareCalculator::default()),
        ledger: Arc::new(BookingLedger::new(Arc::new(MemoryBookingRepository::new()))),
        tickets: None,
    };
    app(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn booking_request(fare: i64, days_out: i64) -> Value {
    let journey_date = (Utc::now().date_naive() + Duration::days(days_out)).to_string();
    json!({
        "userEmail": "rail.fan@example.com",
        "trainNumber": "12301",
        "trainName": "Howrah Rajdhani Express",
        "journeyDate": journey_date,
        "origin": "NDLS",
        "destination": "HWH",
        "departureTime": "16:55",
        "arrivalTime": "09:55",
        "passengers": [
            {"name": "First Traveller", "age": 35, "gender": "F",
             "idType": "Aadhaar", "idNumber": "1111-2222-3333", "seatPreference": "Lower"},
            {"name": "Second Traveller", "age": 37, "gender": "M",
             "idType": "PAN", "idNumber": "ABCDE1234F", "seatPreference": null}
        ],
        "seatNumbers": ["11-1", "11-2"],
        "class": "3A",
        "fare": fare
    })
}

#[tokio::test]
async fn station_search_returns_matches() {
    let response = test_app()
        .oneshot(get("/v1/stations/search?q=mumbai"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["code"].as_str().unwrap())
        .collect();
    assert!(codes.contains(&"CSMT"));
    assert!(codes.contains(&"BCT"));
}

#[tokio::test]
async fn unknown_station_is_a_json_404() {
    let response = test_app().oneshot(get("/v1/stations/XXXX")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("XXXX"));
}

#[tokio::test]
async fn train_search_filters_by_route_and_class() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(get("/v1/trains/search?origin=NDLS&destination=HWH"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let response = app
        .oneshot(get("/v1/trains/search?origin=NDLS&destination=HWH&class=1A"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let trains = body.as_array().unwrap();
    assert_eq!(trains.len(), 1);
    assert_eq!(trains[0]["trainNumber"], "12301");
}

#[tokio::test]
async fn seat_layout_for_unoffered_class_is_404() {
    let response = test_app()
        .oneshot(get("/v1/trains/1/seats?class=CC"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn seat_layout_matches_topology() {
    let response = test_app()
        .oneshot(get("/v1/trains/1/seats?class=1A"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let coaches = body.as_array().unwrap();
    assert_eq!(coaches.len(), 4);
    for coach in coaches {
        assert_eq!(coach["seats"].as_array().unwrap().len(), 6);
    }
}

#[tokio::test]
async fn fare_quote_applies_five_percent_tax() {
    // Train 1 charges 1950 per 3A seat: base 3900, taxes 195.
    let response = test_app()
        .oneshot(get("/v1/trains/1/fare?class=3A&passengers=2"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["baseFare"], 3900);
    assert_eq!(body["taxes"], 195);
    assert_eq!(body["total"], 4095);
}

#[tokio::test]
async fn booking_lifecycle_over_http() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/v1/bookings", booking_request(2000, 3)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let pnr = created["pnr"].as_str().unwrap().to_string();
    assert_eq!(pnr.len(), 10);
    assert!(pnr.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(created["status"], "Confirmed");
    assert_eq!(created["seatNumbers"].as_array().unwrap().len(), 2);
    assert_eq!(created["passengers"].as_array().unwrap().len(), 2);

    let response = app
        .clone()
        .oneshot(get(&format!("/v1/bookings/{}", pnr)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/v1/bookings/{}/cancel", pnr),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let outcome = body_json(response).await;
    assert_eq!(outcome["refundAmount"], 1800);
    assert_eq!(outcome["booking"]["status"], "Cancelled");

    // Cancellation is terminal.
    let response = app
        .oneshot(post_json(
            &format!("/v1/bookings/{}/cancel", pnr),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn mismatched_passengers_and_seats_is_a_400() {
    let mut request = booking_request(2000, 3);
    request["seatNumbers"] = json!(["11-1"]);
    let response = test_app()
        .oneshot(post_json("/v1/bookings", request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_booking_is_a_json_404() {
    let response = test_app()
        .oneshot(get("/v1/bookings/0000000000"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("0000000000"));
}

#[tokio::test]
async fn ticket_route_without_exporter_is_unavailable() {
    let response = test_app()
        .oneshot(get("/v1/bookings/1234567890/ticket"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn train_status_always_answers_for_known_trains() {
    let response = test_app()
        .oneshot(get("/v1/trains/status/12301"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["trainNumber"], "12301");
    assert!(body["currentStatus"].as_str().is_some());
    let platform = body["platform"].as_u64().unwrap();
    assert!((1..=10).contains(&platform));
}

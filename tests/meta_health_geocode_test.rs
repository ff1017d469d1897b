mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn health_endpoints() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response_json(response).await, json!({"status": "OK"}));

    let response = app.get("/health/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = response_json(response).await;
    assert_eq!(payload["status"], "up");
    assert_eq!(payload["database"]["status"], "up");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let app = TestApp::new().await;
    let response = app
        .request(Method::GET, "/api/food-centers/not-a-uuid", None, None)
        .await;
    let header = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap();
    let payload = response_json(response).await;
    assert_eq!(payload["request_id"], header);
}

#[tokio::test]
async fn meta_lists_options_and_map_defaults() {
    let app = TestApp::new().await;
    let response = app.get("/api/meta").await;
    assert_eq!(response.status(), StatusCode::OK);
    let meta = response_json(response).await;

    assert_eq!(meta["default_map_center"], json!({"lat": 52.52, "lng": 13.405}));
    assert_eq!(meta["default_search_radius_m"], 5000.0);
    assert_eq!(meta["food_center_types"][2]["value"], "soup_kitchen");
    assert_eq!(meta["food_center_types"][2]["label"], "Soup Kitchen");
    assert_eq!(meta["availability_statuses"][3]["color"], "gray");
    assert_eq!(meta["languages"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;
    let response = app.get("/api-docs/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = response_json(response).await;
    assert!(doc["paths"]["/api/food-centers"].is_object());
}

#[tokio::test]
async fn reverse_geocoding_parses_the_upstream_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("format", "json"))
        .and(query_param("lat", "52.5021"))
        .and(query_param("lon", "13.4194"))
        .and(query_param("addressdetails", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "display_name": "ignored",
            "address": {
                "road": "Oranienstraße",
                "house_number": "12a",
                "suburb": "Kreuzberg",
                "postcode": "10999",
                "city": "Berlin",
                "country": "Deutschland"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    let app = TestApp::with_config(move |cfg| cfg.nominatim_base_url = base_url).await;

    let response = app.get("/api/geocode/reverse?lat=52.5021&lng=13.4194").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response_json(response).await,
        json!({
            "address": "Oranienstraße 12A",
            "city": "Kreuzberg, 10999 Berlin",
            "country": "Deutschland"
        })
    );
}

#[tokio::test]
async fn reverse_geocoding_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let base_url = server.uri();
    let app = TestApp::with_config(move |cfg| cfg.nominatim_base_url = base_url).await;

    let response = app.get("/api/geocode/reverse?lat=52.5&lng=13.4").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let payload = response_json(response).await;
    assert_eq!(payload["message"], "Upstream service unavailable");

    let response = app.get("/api/geocode/reverse?lat=100&lng=13.4").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

mod common;

use axum::http::{Method, StatusCode};
use common::{center_body, response_json, TestApp};
use meal_map_api::models::UserRole;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn availability_update_sets_current_availability() {
    let app = TestApp::new().await;
    let center = app.create_center(center_body("Tafel", 52.5, 13.4)).await;
    let center_id = center["id"].as_str().unwrap();

    let response = app
        .post(
            "/api/availability",
            json!({"food_center_id": center_id, "status": "limited", "notes": "Only bread left"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let update = response_json(response).await;
    assert_eq!(update["status"], "limited");
    assert_eq!(update["notes"], "Only bread left");
    assert!(update["reported_by"].is_null());

    let response = app
        .post(
            "/api/availability",
            json!({"food_center_id": center_id, "status": "available"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let update = response_json(response).await;
    assert_eq!(update["notes"], "");

    let fetched = response_json(app.get(&format!("/api/food-centers/{}", center_id)).await).await;
    assert_eq!(fetched["current_availability"], "available");

    let history = response_json(app.get(&format!("/api/availability/{}", center_id)).await).await;
    let statuses: Vec<&str> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, ["available", "limited"]);
}

#[tokio::test]
async fn availability_history_is_limited() {
    let app = TestApp::with_config(|cfg| cfg.availability_history_limit = 2).await;
    let center = app.create_center(center_body("Tafel", 52.5, 13.4)).await;
    let center_id = center["id"].as_str().unwrap();

    for status in ["available", "limited", "unavailable"] {
        let response = app
            .post(
                "/api/availability",
                json!({"food_center_id": center_id, "status": status}),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let history = response_json(app.get(&format!("/api/availability/{}", center_id)).await).await;
    assert_eq!(history.as_array().unwrap().len(), 2);
    assert_eq!(history[0]["status"], "unavailable");
}

#[tokio::test]
async fn availability_reporter_defaults_to_caller() {
    let app = TestApp::new().await;
    let center = app.create_center(center_body("Tafel", 52.5, 13.4)).await;
    let user_id = Uuid::new_v4();
    let token = app.token_for(user_id, "helper@example.org");

    let response = app
        .request(
            Method::POST,
            "/api/availability",
            Some(json!({"food_center_id": center["id"], "status": "available"})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let update = response_json(response).await;
    assert_eq!(update["reported_by"], user_id.to_string());
}

#[tokio::test]
async fn availability_for_unknown_center_is_not_found() {
    let app = TestApp::new().await;
    let response = app
        .post(
            "/api/availability",
            json!({"food_center_id": Uuid::new_v4(), "status": "available"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .post(
            "/api/availability",
            json!({"food_center_id": Uuid::new_v4(), "status": "overflowing"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reviews_carry_author_names_and_helpful_votes() {
    let app = TestApp::new().await;
    let center = app.create_center(center_body("Tafel", 52.5, 13.4)).await;
    let center_id = center["id"].as_str().unwrap();
    let (author_id, _) = app.seed_user(UserRole::User).await;

    let response = app
        .post(
            "/api/reviews",
            json!({
                "food_center_id": center_id,
                "user_id": author_id,
                "rating": 5,
                "comment": "Friendly volunteers"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let review = response_json(response).await;
    assert_eq!(review["helpful_count"], 0);
    let review_id = review["id"].as_str().unwrap().to_string();

    let anonymous = Uuid::new_v4();
    let response = app
        .post(
            "/api/reviews",
            json!({"food_center_id": center_id, "user_id": anonymous, "rating": 3}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let reviews = response_json(app.get(&format!("/api/reviews/{}", center_id)).await).await;
    let reviews = reviews.as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["user_id"], anonymous.to_string());
    assert!(reviews[0]["profiles"].is_null());
    assert_eq!(reviews[1]["rating"], 5);
    assert_eq!(reviews[1]["profiles"]["full_name"], "Test user");

    for expected in [1, 2] {
        let response = app
            .request(
                Method::POST,
                &format!("/api/reviews/{}/helpful", review_id),
                None,
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_json(response).await["helpful_count"], expected);
    }

    let response = app
        .request(
            Method::POST,
            &format!("/api/reviews/{}/helpful", Uuid::new_v4()),
            None,
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn review_validation_and_ownership() {
    let app = TestApp::new().await;
    let center = app.create_center(center_body("Tafel", 52.5, 13.4)).await;
    let (user_id, token) = app.seed_user(UserRole::User).await;

    let response = app
        .post(
            "/api/reviews",
            json!({"food_center_id": center["id"], "user_id": user_id, "rating": 6}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = response_json(response).await;
    assert_eq!(payload["fields"][0]["field"], "rating");

    let response = app
        .request(
            Method::POST,
            "/api/reviews",
            Some(json!({"food_center_id": center["id"], "user_id": Uuid::new_v4(), "rating": 4})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .post(
            "/api/reviews",
            json!({"food_center_id": Uuid::new_v4(), "user_id": user_id, "rating": 4}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use meal_map_api::models::UserRole;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn me_requires_a_token() {
    let app = TestApp::new().await;
    let response = app.get("/api/profiles/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let payload = response_json(response).await;
    assert_eq!(payload["error"], "Unauthorized");
}

#[tokio::test]
async fn me_creates_profile_on_first_access() {
    let app = TestApp::new().await;
    let user_id = Uuid::new_v4();
    let token = app.token_for(user_id, "new@example.org");

    let response = app
        .request(Method::GET, "/api/profiles/me", None, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile = response_json(response).await;
    assert_eq!(profile["id"], user_id.to_string());
    assert_eq!(profile["email"], "new@example.org");
    assert_eq!(profile["role"], "user");
    assert_eq!(profile["preferred_language"], "en");

    let again = response_json(
        app.request(Method::GET, "/api/profiles/me", None, Some(&token))
            .await,
    )
    .await;
    assert_eq!(again["id"], profile["id"]);
}

#[tokio::test]
async fn update_profile_fields_but_not_role() {
    let app = TestApp::new().await;
    let (_, token) = app.seed_user(UserRole::Moderator).await;

    let response = app
        .request(
            Method::PUT,
            "/api/profiles/me",
            Some(json!({
                "full_name": "Ayşe Demir",
                "preferred_language": "tr",
                "avatar_url": "https://cdn.example.org/a.png",
                "role": "admin"
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile = response_json(response).await;
    assert_eq!(profile["full_name"], "Ayşe Demir");
    assert_eq!(profile["preferred_language"], "tr");
    assert_eq!(profile["role"], "moderator");
}

#[tokio::test]
async fn update_profile_validates_input() {
    let app = TestApp::new().await;
    let (_, token) = app.seed_user(UserRole::User).await;

    let response = app
        .request(
            Method::PUT,
            "/api/profiles/me",
            Some(json!({"preferred_language": "xx", "avatar_url": "not a url"})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = response_json(response).await;
    let fields: Vec<&str> = payload["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["avatar_url", "preferred_language"]);
}

#[tokio::test]
async fn profiles_by_id() {
    let app = TestApp::new().await;
    let (user_id, token) = app.seed_user(UserRole::User).await;

    let response = app
        .request(
            Method::GET,
            &format!("/api/profiles/{}", user_id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["full_name"], "Test user");

    let response = app
        .request(
            Method::GET,
            &format!("/api/profiles/{}", Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tokens_are_rejected_without_a_configured_secret() {
    let app = TestApp::with_config(|cfg| cfg.jwt_secret = None).await;
    let token = app.token_for(Uuid::new_v4(), "x@example.org");
    let response = app
        .request(Method::GET, "/api/profiles/me", None, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use meal_map_api::{
    config::AppConfig,
    db,
    entities::profile,
    models::UserRole,
    AppState,
};
use sea_orm::{ActiveModelTrait, Set};
use serde::Serialize;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

#[derive(Serialize)]
struct TestClaims<'a> {
    sub: String,
    aud: &'a str,
    exp: i64,
    email: &'a str,
}

/// Helper harness for spinning up the application against an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Like [`TestApp::new`] with a hook to adjust configuration first.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            0,
            "test".to_string(),
        );
        // One connection so every query sees the same in-memory database.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.jwt_secret = Some(TEST_SECRET.to_string());
        adjust(&mut cfg);

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg).expect("failed to build app state");
        let router = meal_map_api::build_router(state.clone());

        Self { router, state }
    }

    /// Mints an access token the way the auth provider would.
    pub fn token_for(&self, user_id: Uuid, email: &str) -> String {
        let claims = TestClaims {
            sub: user_id.to_string(),
            aud: "authenticated",
            exp: chrono::Utc::now().timestamp() + 3600,
            email,
        };
        jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .expect("encode access token")
    }

    /// Inserts a profile with `role` and returns a token for it.
    pub async fn seed_user(&self, role: UserRole) -> (Uuid, String) {
        let id = Uuid::new_v4();
        let email = format!("{}@example.org", role);
        profile::ActiveModel {
            id: Set(id),
            email: Set(email.clone()),
            full_name: Set(Some(format!("Test {}", role))),
            avatar_url: Set(None),
            role: Set(role),
            preferred_language: Set("en".to_string()),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("seed profile");
        (id, self.token_for(id, &email))
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Response {
        self.request(Method::POST, uri, Some(body), None).await
    }

    /// Creates a food center and returns its JSON representation.
    pub async fn create_center(&self, body: Value) -> Value {
        let response = self.post("/api/food-centers", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        response_json(response).await
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// Minimal valid create payload.
pub fn center_body(name: &str, lat: f64, lng: f64) -> Value {
    json!({
        "name": name,
        "type": "food_bank",
        "address": "Teststraße 1",
        "city": "Berlin",
        "country": "Germany",
        "location": {"lat": lat, "lng": lng}
    })
}

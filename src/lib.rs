//! Meal Map API Library
//!
//! REST backend for a crowdsourced map of free food distribution points.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod geo;
pub mod handlers;
pub mod hours;
pub mod middleware_helpers;
pub mod migrator;
pub mod models;
pub mod openapi;
pub mod ranking;
pub mod services;
pub mod tracing;

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::HeaderValue,
    response::Json,
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};

use crate::{auth::AuthService, config::AppConfig, db::DbPool, handlers::AppServices};

/// Result type of JSON handlers.
pub type ApiResult<T> = Result<Json<T>, errors::ServiceError>;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: Arc<AppConfig>,
    pub services: AppServices,
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Wires services and auth on top of an open connection pool.
    pub fn new(db: Arc<DbPool>, config: AppConfig) -> Result<Self, errors::ServiceError> {
        let services = AppServices::new(db.clone(), &config)?;
        let auth = Arc::new(AuthService::new(&config, db.clone()));
        Ok(Self {
            db,
            config: Arc::new(config),
            services,
            auth,
        })
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

/// Routes mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/food-centers", handlers::food_centers::food_center_routes())
        .nest("/availability", handlers::availability::availability_routes())
        .nest("/reviews", handlers::reviews::review_routes())
        .nest("/reports", handlers::reports::report_routes())
        .nest("/profiles", handlers::profiles::profile_routes())
        .nest("/geocode", handlers::geocoding::geocoding_routes())
        .nest("/meta", handlers::meta::meta_routes())
}

/// CORS policy from config: explicit origins, permissive in development or when
/// opted in, otherwise same-origin only.
pub fn cors_layer(cfg: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if !origins.is_empty() {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else if cfg.should_allow_permissive_cors() {
        ::tracing::info!(
            "Using permissive CORS because explicit origins were not configured ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "explicit override enabled"
            }
        );
        CorsLayer::permissive()
    } else {
        ::tracing::warn!("No CORS origins configured; cross-origin requests will be refused");
        CorsLayer::new()
    }
}

/// Full application router with middleware applied.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let body_limit = state.config.max_body_size;

    Router::new()
        .nest("/health", handlers::health::health_routes())
        .nest("/api", api_routes())
        .merge(openapi::swagger_ui())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(DefaultBodyLimit::max(body_limit))
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .with_state(state)
}

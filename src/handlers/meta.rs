use axum::{extract::State, response::Json, routing::get, Router};
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    geo::{Coordinates, DEFAULT_MAP_CENTER},
    models::{AvailabilityStatus, DietaryRestriction, FoodCenterType, LANGUAGES},
    AppState,
};

/// A selectable value with its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OptionEntry {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl OptionEntry {
    fn new(value: impl ToString, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            color: None,
        }
    }
}

/// Static data the map client needs to render filters and markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetaResponse {
    pub food_center_types: Vec<OptionEntry>,
    pub dietary_restrictions: Vec<OptionEntry>,
    pub availability_statuses: Vec<OptionEntry>,
    pub languages: Vec<OptionEntry>,
    pub default_map_center: Coordinates,
    pub default_search_radius_m: f64,
    pub max_search_radius_m: f64,
}

pub fn meta_routes() -> Router<AppState> {
    Router::new().route("/", get(get_meta))
}

fn build_meta(default_radius: f64, max_radius: f64) -> MetaResponse {
    MetaResponse {
        food_center_types: FoodCenterType::iter()
            .map(|t| OptionEntry::new(t, t.label()))
            .collect(),
        dietary_restrictions: DietaryRestriction::iter()
            .map(|r| OptionEntry::new(r, r.label()))
            .collect(),
        availability_statuses: AvailabilityStatus::iter()
            .map(|s| OptionEntry {
                color: Some(s.color().to_string()),
                ..OptionEntry::new(s, s.label())
            })
            .collect(),
        languages: LANGUAGES
            .iter()
            .map(|(code, label)| OptionEntry::new(code, label))
            .collect(),
        default_map_center: DEFAULT_MAP_CENTER,
        default_search_radius_m: default_radius,
        max_search_radius_m: max_radius,
    }
}

#[utoipa::path(
    get,
    path = "/api/meta",
    responses(
        (status = 200, description = "Option lists and map defaults", body = MetaResponse)
    ),
    tag = "meta"
)]
pub async fn get_meta(State(state): State<AppState>) -> Json<MetaResponse> {
    Json(build_meta(
        state.config.default_search_radius_m,
        state.config.max_search_radius_m,
    ))
}

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Deserialize;
use utoipa::IntoParams;

use super::{common::ValidatedQuery, food_centers::search_origin};
use crate::{services::DisplayAddress, ApiResult, AppState};

pub fn geocoding_routes() -> Router<AppState> {
    Router::new().route("/reverse", get(reverse_geocode))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReverseGeocodeQuery {
    pub lat: f64,
    pub lng: f64,
}

#[utoipa::path(
    get,
    path = "/api/geocode/reverse",
    params(ReverseGeocodeQuery),
    responses(
        (status = 200, description = "Display address for the position", body = DisplayAddress),
        (status = 400, description = "Invalid position", body = crate::errors::ErrorResponse),
        (status = 502, description = "Geocoder unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "geocoding"
)]
pub async fn reverse_geocode(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ReverseGeocodeQuery>,
) -> ApiResult<DisplayAddress> {
    let position = search_origin(query.lat, query.lng)?;
    Ok(Json(state.services.geocoding.reverse(position).await?))
}

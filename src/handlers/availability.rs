use axum::{
    extract::{Path, State},
    response::{Json, Response},
    routing::{get, post},
    Router,
};

use super::common::{created_response, parse_id, ValidatedJson};
use crate::{
    auth::MaybeAuthUser,
    errors::ServiceError,
    models::{AvailabilityUpdate, CreateAvailabilityRequest},
    ApiResult, AppState,
};

pub fn availability_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_availability_update))
        .route("/:food_center_id", get(list_availability_updates))
}

#[utoipa::path(
    get,
    path = "/api/availability/{food_center_id}",
    params(
        ("food_center_id" = Uuid, Path, description = "Food center ID")
    ),
    responses(
        (status = 200, description = "Latest availability updates, newest first", body = Vec<AvailabilityUpdate>),
        (status = 400, description = "Invalid ID", body = crate::errors::ErrorResponse)
    ),
    tag = "availability"
)]
pub async fn list_availability_updates(
    State(state): State<AppState>,
    Path(food_center_id): Path<String>,
) -> ApiResult<Vec<AvailabilityUpdate>> {
    let food_center_id = parse_id(&food_center_id, "food_center_id")?;
    Ok(Json(
        state
            .services
            .availability
            .list_for_center(food_center_id)
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/availability",
    request_body = CreateAvailabilityRequest,
    responses(
        (status = 201, description = "Availability reported", body = AvailabilityUpdate),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Food center not found", body = crate::errors::ErrorResponse)
    ),
    tag = "availability"
)]
pub async fn create_availability_update(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    ValidatedJson(payload): ValidatedJson<CreateAvailabilityRequest>,
) -> Result<Response, ServiceError> {
    let update = state
        .services
        .availability
        .create(payload, caller.map(|c| c.user_id))
        .await?;
    Ok(created_response(update))
}

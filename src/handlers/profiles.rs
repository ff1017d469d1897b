use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use super::common::{parse_id, ValidatedJson};
use crate::{
    auth::AuthUser,
    models::{Profile, UpdateProfileRequest},
    ApiResult, AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_my_profile).put(update_my_profile))
        .route("/:id", get(get_profile))
}

#[utoipa::path(
    get,
    path = "/api/profiles/me",
    responses(
        (status = 200, description = "Caller's profile, created on first access", body = Profile),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "profiles"
)]
pub async fn get_my_profile(State(state): State<AppState>, user: AuthUser) -> ApiResult<Profile> {
    Ok(Json(state.services.profiles.me(&user).await?))
}

#[utoipa::path(
    put,
    path = "/api/profiles/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = Profile),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "profiles"
)]
pub async fn update_my_profile(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Profile> {
    Ok(Json(state.services.profiles.upsert(&user, payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Profile fetched", body = Profile),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Profile not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "profiles"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Profile> {
    let id = parse_id(&id, "id")?;
    Ok(Json(state.services.profiles.get(id).await?))
}

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
    models::{CreateReviewRequest, Review, ReviewWithAuthor},
    ApiResult, AppState,
};

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review))
        .route("/:id", get(list_reviews))
        .route("/:id/helpful", post(mark_review_helpful))
}

#[utoipa::path(
    get,
    path = "/api/reviews/{food_center_id}",
    params(
        ("food_center_id" = Uuid, Path, description = "Food center ID")
    ),
    responses(
        (status = 200, description = "Reviews with author names, newest first", body = Vec<ReviewWithAuthor>),
        (status = 400, description = "Invalid ID", body = crate::errors::ErrorResponse)
    ),
    tag = "reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(food_center_id): Path<String>,
) -> ApiResult<Vec<ReviewWithAuthor>> {
    let food_center_id = parse_id(&food_center_id, "food_center_id")?;
    Ok(Json(
        state.services.reviews.list_for_center(food_center_id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 403, description = "Review posted on behalf of another user", body = crate::errors::ErrorResponse),
        (status = 404, description = "Food center not found", body = crate::errors::ErrorResponse)
    ),
    tag = "reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    ValidatedJson(payload): ValidatedJson<CreateReviewRequest>,
) -> Result<Response, ServiceError> {
    if let Some(caller) = caller {
        if caller.user_id != payload.user_id {
            return Err(ServiceError::Forbidden(
                "Reviews can only be posted as yourself".to_string(),
            ));
        }
    }
    let review = state.services.reviews.create(payload).await?;
    Ok(created_response(review))
}

#[utoipa::path(
    post,
    path = "/api/reviews/{id}/helpful",
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Helpful count incremented", body = Review),
        (status = 404, description = "Review not found", body = crate::errors::ErrorResponse)
    ),
    tag = "reviews"
)]
pub async fn mark_review_helpful(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Review> {
    let id = parse_id(&id, "id")?;
    Ok(Json(state.services.reviews.mark_helpful(id).await?))
}

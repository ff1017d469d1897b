use axum::{
    extract::{Path, State},
    response::{Json, Response},
    routing::{get, put},
    Router,
};

use super::common::{created_response, parse_id, ValidatedJson, ValidatedQuery};
use crate::{
    auth::{AuthUser, MaybeAuthUser},
    errors::ServiceError,
    models::{
        CreateReportRequest, ModerateReportRequest, ReportListQuery, ReportStatus, UserReport,
    },
    ApiResult, AppState,
};

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reports).post(create_report))
        .route("/:id/moderate", put(moderate_report))
}

#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportRequest,
    responses(
        (status = 201, description = "Report submitted", body = UserReport),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 403, description = "Only moderators may submit a decided report", body = crate::errors::ErrorResponse),
        (status = 404, description = "Food center not found", body = crate::errors::ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    ValidatedJson(payload): ValidatedJson<CreateReportRequest>,
) -> Result<Response, ServiceError> {
    if payload.status != ReportStatus::Pending {
        match &caller {
            Some(user) => user.require_moderator()?,
            None => {
                return Err(ServiceError::Forbidden(
                    "Moderator role required".to_string(),
                ))
            }
        }
    }

    let report = state
        .services
        .reports
        .create(payload, caller.map(|c| c.user_id))
        .await?;
    Ok(created_response(report))
}

#[utoipa::path(
    get,
    path = "/api/reports",
    params(ReportListQuery),
    responses(
        (status = 200, description = "Reports in submission order", body = Vec<UserReport>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_reports(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedQuery(query): ValidatedQuery<ReportListQuery>,
) -> ApiResult<Vec<UserReport>> {
    user.require_moderator()?;
    Ok(Json(state.services.reports.list(query.status).await?))
}

#[utoipa::path(
    put,
    path = "/api/reports/{id}/moderate",
    request_body = ModerateReportRequest,
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report moderated", body = UserReport),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse),
        (status = 404, description = "Report not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn moderate_report(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<ModerateReportRequest>,
) -> ApiResult<UserReport> {
    user.require_moderator()?;
    let id = parse_id(&id, "id")?;
    Ok(Json(
        state
            .services
            .reports
            .moderate(id, user.user_id, payload.status)
            .await?,
    ))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::ReportStatus;
use crate::entities::user_report;

/// User-submitted correction or complaint awaiting moderation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserReport {
    pub id: Uuid,
    pub food_center_id: Option<Uuid>,
    pub reporter_id: Option<Uuid>,
    #[serde(rename = "type")]
    #[schema(example = "wrong_hours")]
    pub r#type: String,
    #[schema(value_type = Object)]
    pub content: serde_json::Value,
    pub status: ReportStatus,
    pub moderated_by: Option<Uuid>,
    pub moderated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<user_report::Model> for UserReport {
    fn from(model: user_report::Model) -> Self {
        Self {
            id: model.id,
            food_center_id: model.food_center_id,
            reporter_id: model.reporter_id,
            r#type: model.kind,
            content: model.content,
            status: model.status,
            moderated_by: model.moderated_by,
            moderated_at: model.moderated_at,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "food_center_id": "7d7f3a4e-9d1b-4c7e-a3a0-6f1c2b8e4d11",
    "type": "wrong_hours",
    "content": {"message": "Closed on Mondays now"}
}))]
pub struct CreateReportRequest {
    pub food_center_id: Option<Uuid>,
    /// Defaults to the authenticated caller.
    pub reporter_id: Option<Uuid>,
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub r#type: String,
    #[schema(value_type = Object)]
    pub content: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub status: ReportStatus,
}

fn validate_moderation_outcome(status: &ReportStatus) -> Result<(), ValidationError> {
    if *status == ReportStatus::Pending {
        let mut err = ValidationError::new("moderation_outcome");
        err.message = Some("status must be approved or rejected".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"status": "approved"}))]
pub struct ModerateReportRequest {
    #[validate(custom = "validate_moderation_outcome")]
    pub status: ReportStatus,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportListQuery {
    pub status: Option<ReportStatus>,
}

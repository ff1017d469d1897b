use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::AvailabilityStatus;
use crate::entities::availability_update;

/// A crowd-sourced stock report for a food center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "0b1f2a6c-3d4e-4f50-8a9b-1c2d3e4f5a6b",
    "food_center_id": "7d7f3a4e-9d1b-4c7e-a3a0-6f1c2b8e4d11",
    "status": "limited",
    "notes": "Only bread left",
    "reported_by": null,
    "created_at": "2024-06-03T12:15:00Z"
}))]
pub struct AvailabilityUpdate {
    pub id: Uuid,
    pub food_center_id: Uuid,
    pub status: AvailabilityStatus,
    pub notes: String,
    pub reported_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<availability_update::Model> for AvailabilityUpdate {
    fn from(model: availability_update::Model) -> Self {
        Self {
            id: model.id,
            food_center_id: model.food_center_id,
            status: model.status,
            notes: model.notes,
            reported_by: model.reported_by,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "food_center_id": "7d7f3a4e-9d1b-4c7e-a3a0-6f1c2b8e4d11",
    "status": "limited",
    "notes": "Only bread left"
}))]
pub struct CreateAvailabilityRequest {
    pub food_center_id: Uuid,
    pub status: AvailabilityStatus,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    /// Defaults to the authenticated caller.
    pub reported_by: Option<Uuid>,
}

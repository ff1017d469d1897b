use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::user_report,
    errors::ServiceError,
    models::{CreateReportRequest, ReportStatus, UserReport},
    services::food_centers::FoodCenterService,
};

/// User reports and their moderation.
#[derive(Clone)]
pub struct ReportService {
    db_pool: Arc<DbPool>,
    food_centers: Arc<FoodCenterService>,
}

impl ReportService {
    pub fn new(db_pool: Arc<DbPool>, food_centers: Arc<FoodCenterService>) -> Self {
        Self {
            db_pool,
            food_centers,
        }
    }

    #[instrument(skip(self, input), fields(kind = %input.r#type))]
    pub async fn create(
        &self,
        input: CreateReportRequest,
        caller: Option<Uuid>,
    ) -> Result<UserReport, ServiceError> {
        if let Some(center_id) = input.food_center_id {
            self.food_centers.ensure_exists(center_id).await?;
        }

        let model = user_report::ActiveModel {
            id: Set(Uuid::new_v4()),
            food_center_id: Set(input.food_center_id),
            reporter_id: Set(input.reporter_id.or(caller)),
            kind: Set(input.r#type),
            content: Set(serde_json::Value::Object(input.content)),
            status: Set(input.status),
            moderated_by: Set(None),
            moderated_at: Set(None),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(report_id = %model.id, "report submitted");
        Ok(model.into())
    }

    /// Reports in submission order, optionally narrowed to one status.
    #[instrument(skip(self))]
    pub async fn list(&self, status: Option<ReportStatus>) -> Result<Vec<UserReport>, ServiceError> {
        let mut query = user_report::Entity::find().order_by_asc(user_report::Column::CreatedAt);
        if let Some(status) = status {
            query = query.filter(user_report::Column::Status.eq(status));
        }
        let reports = query.all(&*self.db_pool).await?;
        Ok(reports.into_iter().map(UserReport::from).collect())
    }

    /// Records a moderation decision.
    #[instrument(skip(self))]
    pub async fn moderate(
        &self,
        id: Uuid,
        moderator: Uuid,
        status: ReportStatus,
    ) -> Result<UserReport, ServiceError> {
        let report = user_report::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("Report not found"))?;

        let mut active = report.into_active_model();
        active.status = Set(status);
        active.moderated_by = Set(Some(moderator));
        active.moderated_at = Set(Some(Utc::now()));
        let model = active.update(&*self.db_pool).await?;

        info!(report_id = %model.id, status = %model.status, moderator = %moderator, "report moderated");
        Ok(model.into())
    }
}

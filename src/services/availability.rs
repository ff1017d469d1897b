use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::{availability_update, food_center},
    errors::ServiceError,
    models::{AvailabilityUpdate, CreateAvailabilityRequest},
    services::food_centers::FOOD_CENTER_NOT_FOUND,
};

/// Crowd-sourced stock reports.
#[derive(Clone)]
pub struct AvailabilityService {
    db_pool: Arc<DbPool>,
    history_limit: u64,
}

impl AvailabilityService {
    pub fn new(db_pool: Arc<DbPool>, history_limit: u64) -> Self {
        Self {
            db_pool,
            history_limit,
        }
    }

    /// Most recent updates for a center, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_center(
        &self,
        food_center_id: Uuid,
    ) -> Result<Vec<AvailabilityUpdate>, ServiceError> {
        let updates = availability_update::Entity::find()
            .filter(availability_update::Column::FoodCenterId.eq(food_center_id))
            .order_by_desc(availability_update::Column::CreatedAt)
            .limit(self.history_limit)
            .all(&*self.db_pool)
            .await?;

        Ok(updates.into_iter().map(AvailabilityUpdate::from).collect())
    }

    /// Records an update and makes it the center's current availability.
    #[instrument(skip(self, input), fields(food_center_id = %input.food_center_id))]
    pub async fn create(
        &self,
        input: CreateAvailabilityRequest,
        caller: Option<Uuid>,
    ) -> Result<AvailabilityUpdate, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let center = food_center::Entity::find_by_id(input.food_center_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found(FOOD_CENTER_NOT_FOUND))?;

        let update = availability_update::ActiveModel {
            id: Set(Uuid::new_v4()),
            food_center_id: Set(input.food_center_id),
            status: Set(input.status),
            notes: Set(input.notes.unwrap_or_default()),
            reported_by: Set(input.reported_by.or(caller)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut center = center.into_active_model();
        center.current_availability = Set(input.status);
        center.update(&txn).await?;

        txn.commit().await?;

        info!(update_id = %update.id, status = %update.status, "availability reported");
        Ok(update.into())
    }
}

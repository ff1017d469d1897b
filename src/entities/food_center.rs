use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, ActiveValue::Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AvailabilityStatus, FoodCenterType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "food_centers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(column_name = "type")]
    pub kind: FoodCenterType,
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub contact_person: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[sea_orm(column_type = "Json", nullable)]
    pub operating_hours: Option<Json>,
    #[sea_orm(column_type = "Json", nullable)]
    pub dietary_restrictions: Option<Json>,
    #[sea_orm(column_type = "Json", nullable)]
    pub languages_spoken: Option<Json>,
    pub capacity: Option<i32>,
    pub current_availability: AvailabilityStatus,
    pub verified: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::availability_update::Entity")]
    AvailabilityUpdates,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::availability_update::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AvailabilityUpdates.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        let now = Utc::now();

        if insert {
            active_model.created_at = Set(now);
        }
        active_model.updated_at = Set(now);

        Ok(active_model)
    }
}

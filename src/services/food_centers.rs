use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::food_center,
    errors::ServiceError,
    geo::{haversine_distance, BoundingBox, Coordinates},
    models::{
        CreateFoodCenterRequest, FoodCenter, FoodCenterFilter, NearbyFoodCenter,
        UpdateFoodCenterRequest,
    },
};

pub const FOOD_CENTER_NOT_FOUND: &str = "Food center not found";

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ServiceError> {
    serde_json::to_value(value)
        .map_err(|e| ServiceError::InternalError(format!("failed to encode JSON column: {}", e)))
}

fn optional_json<T: serde::Serialize>(
    value: Option<&T>,
) -> Result<Option<serde_json::Value>, ServiceError> {
    value.map(to_json).transpose()
}

/// Persistence of food centers and radius search.
#[derive(Clone)]
pub struct FoodCenterService {
    db_pool: Arc<DbPool>,
}

impl FoodCenterService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists centers matching `filter`, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &FoodCenterFilter) -> Result<Vec<FoodCenter>, ServiceError> {
        let mut query = food_center::Entity::find().order_by_desc(food_center::Column::CreatedAt);

        if let Some(kind) = filter.r#type {
            query = query.filter(food_center::Column::Kind.eq(kind));
        }
        if let Some(city) = &filter.city {
            query = query.filter(food_center::Column::City.eq(city.as_str()));
        }
        if let Some(verified) = filter.verified {
            query = query.filter(food_center::Column::Verified.eq(verified));
        }

        let centers = query
            .all(&*self.db_pool)
            .await?
            .into_iter()
            .map(FoodCenter::from)
            // Restrictions live in a JSON column, so overlap is checked here.
            .filter(|c| c.serves_any(&filter.dietary_restrictions))
            .collect();

        Ok(centers)
    }

    async fn find_model(&self, id: Uuid) -> Result<food_center::Model, ServiceError> {
        food_center::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::not_found(FOOD_CENTER_NOT_FOUND))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<FoodCenter, ServiceError> {
        self.find_model(id).await.map(FoodCenter::from)
    }

    /// Fails with 404 unless the center exists.
    pub async fn ensure_exists(&self, id: Uuid) -> Result<(), ServiceError> {
        self.find_model(id).await.map(|_| ())
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(
        &self,
        input: CreateFoodCenterRequest,
        caller: Option<Uuid>,
    ) -> Result<FoodCenter, ServiceError> {
        let model = food_center::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
            kind: Set(input.r#type),
            address: Set(input.address),
            city: Set(input.city),
            country: Set(input.country),
            postal_code: Set(input.postal_code),
            phone: Set(input.phone),
            email: Set(input.email),
            website: Set(input.website),
            contact_person: Set(input.contact_person),
            latitude: Set(input.location.lat),
            longitude: Set(input.location.lng),
            operating_hours: Set(optional_json(input.operating_hours.as_ref())?),
            dietary_restrictions: Set(optional_json(input.dietary_restrictions.as_ref())?),
            languages_spoken: Set(optional_json(input.languages_spoken.as_ref())?),
            capacity: Set(input.capacity),
            current_availability: Set(input.current_availability),
            verified: Set(input.verified),
            created_by: Set(input.created_by.or(caller)),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        }
        .insert(&*self.db_pool)
        .await?;

        info!(food_center_id = %model.id, "food center created");
        Ok(model.into())
    }

    /// Applies the fields present in `input`.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateFoodCenterRequest,
    ) -> Result<FoodCenter, ServiceError> {
        let mut active = self.find_model(id).await?.into_active_model();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(kind) = input.r#type {
            active.kind = Set(kind);
        }
        if let Some(address) = input.address {
            active.address = Set(address);
        }
        if let Some(city) = input.city {
            active.city = Set(city);
        }
        if let Some(country) = input.country {
            active.country = Set(country);
        }
        if let Some(postal_code) = input.postal_code {
            active.postal_code = Set(Some(postal_code));
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(email) = input.email {
            active.email = Set(Some(email));
        }
        if let Some(website) = input.website {
            active.website = Set(Some(website));
        }
        if let Some(contact_person) = input.contact_person {
            active.contact_person = Set(Some(contact_person));
        }
        if let Some(location) = input.location {
            active.latitude = Set(location.lat);
            active.longitude = Set(location.lng);
        }
        if let Some(hours) = input.operating_hours {
            active.operating_hours = Set(Some(to_json(&hours)?));
        }
        if let Some(restrictions) = input.dietary_restrictions {
            active.dietary_restrictions = Set(Some(to_json(&restrictions)?));
        }
        if let Some(languages) = input.languages_spoken {
            active.languages_spoken = Set(Some(to_json(&languages)?));
        }
        if let Some(capacity) = input.capacity {
            active.capacity = Set(Some(capacity));
        }
        if let Some(availability) = input.current_availability {
            active.current_availability = Set(availability);
        }
        if let Some(verified) = input.verified {
            active.verified = Set(verified);
        }

        let model = active.update(&*self.db_pool).await?;
        info!(food_center_id = %model.id, "food center updated");
        Ok(model.into())
    }

    /// Every center within `radius_m` of `origin`, nearest first.
    #[instrument(skip(self))]
    pub async fn nearby(
        &self,
        origin: Coordinates,
        radius_m: f64,
    ) -> Result<Vec<NearbyFoodCenter>, ServiceError> {
        let bbox = BoundingBox::around(origin, radius_m);

        let mut query = food_center::Entity::find()
            .filter(food_center::Column::Latitude.between(bbox.min_lat, bbox.max_lat));
        if let Some((min_lng, max_lng)) = bbox.lng_range {
            query = query.filter(food_center::Column::Longitude.between(min_lng, max_lng));
        }

        let mut found: Vec<NearbyFoodCenter> = query
            .all(&*self.db_pool)
            .await?
            .into_iter()
            .map(FoodCenter::from)
            .filter_map(|center| {
                let distance_m = haversine_distance(origin, center.location);
                (distance_m <= radius_m).then_some(NearbyFoodCenter { center, distance_m })
            })
            .collect();

        found.sort_by(|a, b| {
            a.distance_m
                .total_cmp(&b.distance_m)
                .then_with(|| a.center.name.cmp(&b.center.name))
        });
        Ok(found)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::{AvailabilityStatus, DietaryRestriction, FoodCenterType};
use crate::entities::food_center;
use crate::geo::Coordinates;
use crate::hours::{validate_operating_hours, OperatingHours};
use crate::ranking::SortMode;

/// A food distribution point as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "7d7f3a4e-9d1b-4c7e-a3a0-6f1c2b8e4d11",
    "name": "Tafel Kreuzberg",
    "description": "Weekly grocery distribution",
    "type": "food_bank",
    "address": "Oranienstraße 12",
    "city": "Berlin",
    "country": "Germany",
    "postal_code": "10999",
    "location": {"lat": 52.5021, "lng": 13.4194},
    "operating_hours": {"mon": {"open": "09:00", "close": "17:00"}},
    "dietary_restrictions": ["vegetarian", "halal"],
    "languages_spoken": ["de", "en", "tr"],
    "capacity": 200,
    "current_availability": "available",
    "verified": true,
    "created_at": "2024-06-01T10:30:00Z",
    "updated_at": "2024-06-01T10:30:00Z"
}))]
pub struct FoodCenter {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub r#type: FoodCenterType,
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub contact_person: Option<String>,
    pub location: Coordinates,
    #[schema(value_type = Option<Object>)]
    pub operating_hours: Option<OperatingHours>,
    pub dietary_restrictions: Option<Vec<DietaryRestriction>>,
    pub languages_spoken: Option<Vec<String>>,
    pub capacity: Option<i32>,
    pub current_availability: AvailabilityStatus,
    pub verified: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FoodCenter {
    /// True when the center caters for at least one of `wanted`.
    pub fn serves_any(&self, wanted: &[DietaryRestriction]) -> bool {
        wanted.is_empty()
            || self
                .dietary_restrictions
                .as_ref()
                .is_some_and(|have| have.iter().any(|r| wanted.contains(r)))
    }
}

impl From<food_center::Model> for FoodCenter {
    fn from(model: food_center::Model) -> Self {
        // JSON columns that no longer match the schema are surfaced as absent.
        let operating_hours = model
            .operating_hours
            .and_then(|v| serde_json::from_value(v).ok());
        let dietary_restrictions = model
            .dietary_restrictions
            .and_then(|v| serde_json::from_value(v).ok());
        let languages_spoken = model
            .languages_spoken
            .and_then(|v| serde_json::from_value(v).ok());

        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            r#type: model.kind,
            address: model.address,
            city: model.city,
            country: model.country,
            postal_code: model.postal_code,
            phone: model.phone,
            email: model.email,
            website: model.website,
            contact_person: model.contact_person,
            location: Coordinates::new(model.latitude, model.longitude),
            operating_hours,
            dietary_restrictions,
            languages_spoken,
            capacity: model.capacity,
            current_availability: model.current_availability,
            verified: model.verified,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Tafel Kreuzberg",
    "type": "food_bank",
    "address": "Oranienstraße 12",
    "city": "Berlin",
    "country": "Germany",
    "location": {"lat": 52.5021, "lng": 13.4194},
    "operating_hours": {"mon": {"open": "09:00", "close": "17:00"}},
    "dietary_restrictions": ["vegetarian"]
}))]
pub struct CreateFoodCenterRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub r#type: FoodCenterType,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub country: String,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub contact_person: Option<String>,
    #[validate]
    pub location: Coordinates,
    #[validate(custom = "validate_operating_hours")]
    #[schema(value_type = Option<Object>)]
    pub operating_hours: Option<OperatingHours>,
    pub dietary_restrictions: Option<Vec<DietaryRestriction>>,
    pub languages_spoken: Option<Vec<String>>,
    #[validate(range(min = 0))]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub current_availability: AvailabilityStatus,
    #[serde(default)]
    pub verified: bool,
    /// Defaults to the authenticated caller.
    pub created_by: Option<Uuid>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFoodCenterRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<FoodCenterType>,
    #[validate(length(min = 1))]
    pub address: Option<String>,
    #[validate(length(min = 1))]
    pub city: Option<String>,
    #[validate(length(min = 1))]
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub contact_person: Option<String>,
    #[validate]
    pub location: Option<Coordinates>,
    #[validate(custom = "validate_operating_hours")]
    #[schema(value_type = Option<Object>)]
    pub operating_hours: Option<OperatingHours>,
    pub dietary_restrictions: Option<Vec<DietaryRestriction>>,
    pub languages_spoken: Option<Vec<String>>,
    #[validate(range(min = 0))]
    pub capacity: Option<i32>,
    pub current_availability: Option<AvailabilityStatus>,
    pub verified: Option<bool>,
}

/// Query string of `GET /api/food-centers`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FoodCenterListQuery {
    /// Center type, e.g. `food_bank`
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub city: Option<String>,
    pub verified: Option<bool>,
    /// Comma separated restrictions; a center matches if it serves any of them
    pub dietary_restrictions: Option<String>,
    /// With `lng`, orders results by distance from this point
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Parsed list filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodCenterFilter {
    pub r#type: Option<FoodCenterType>,
    pub city: Option<String>,
    pub verified: Option<bool>,
    pub dietary_restrictions: Vec<DietaryRestriction>,
}

/// Query string of `GET /api/food-centers/nearby`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    /// Search radius in meters
    pub radius_meters: Option<f64>,
    pub sort: Option<SortMode>,
    /// Instant used for open-status evaluation; defaults to now
    pub at: Option<DateTime<Utc>>,
}

/// A center found by a radius search.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyFoodCenter {
    pub center: FoodCenter,
    pub distance_m: f64,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::review;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub food_center_id: Uuid,
    pub user_id: Uuid,
    #[schema(minimum = 1, maximum = 5, example = 5)]
    pub rating: i32,
    pub comment: Option<String>,
    pub helpful_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<review::Model> for Review {
    fn from(model: review::Model) -> Self {
        Self {
            id: model.id,
            food_center_id: model.food_center_id,
            user_id: model.user_id,
            rating: model.rating,
            comment: model.comment,
            helpful_count: model.helpful_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Public part of the review author's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewAuthor {
    pub full_name: Option<String>,
}

/// Review joined with its author, as listed for a center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "5c0e7f9a-1b2c-4d3e-8f4a-5b6c7d8e9f01",
    "food_center_id": "7d7f3a4e-9d1b-4c7e-a3a0-6f1c2b8e4d11",
    "user_id": "9a8b7c6d-5e4f-4a3b-2c1d-0e9f8a7b6c5d",
    "rating": 5,
    "comment": "Friendly volunteers",
    "helpful_count": 2,
    "created_at": "2024-06-03T12:15:00Z",
    "updated_at": "2024-06-03T12:15:00Z",
    "profiles": {"full_name": "Ayşe Demir"}
}))]
pub struct ReviewWithAuthor {
    #[serde(flatten)]
    pub review: Review,
    pub profiles: Option<ReviewAuthor>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "food_center_id": "7d7f3a4e-9d1b-4c7e-a3a0-6f1c2b8e4d11",
    "user_id": "9a8b7c6d-5e4f-4a3b-2c1d-0e9f8a7b6c5d",
    "rating": 5,
    "comment": "Friendly volunteers"
}))]
pub struct CreateReviewRequest {
    pub food_center_id: Uuid,
    pub user_id: Uuid,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(5, true)]
    #[case(6, false)]
    fn rating_bounds(#[case] rating: i32, #[case] ok: bool) {
        let req: CreateReviewRequest = serde_json::from_value(json!({
            "food_center_id": "7d7f3a4e-9d1b-4c7e-a3a0-6f1c2b8e4d11",
            "user_id": "9a8b7c6d-5e4f-4a3b-2c1d-0e9f8a7b6c5d",
            "rating": rating
        }))
        .unwrap();
        assert_eq!(req.validate().is_ok(), ok);
    }
}

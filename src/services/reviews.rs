use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::{profile, review},
    errors::ServiceError,
    models::{CreateReviewRequest, Review, ReviewAuthor, ReviewWithAuthor},
    services::food_centers::FoodCenterService,
};

#[derive(Clone)]
pub struct ReviewService {
    db_pool: Arc<DbPool>,
    food_centers: Arc<FoodCenterService>,
}

impl ReviewService {
    pub fn new(db_pool: Arc<DbPool>, food_centers: Arc<FoodCenterService>) -> Self {
        Self {
            db_pool,
            food_centers,
        }
    }

    /// Reviews of a center with their author's name, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_center(
        &self,
        food_center_id: Uuid,
    ) -> Result<Vec<ReviewWithAuthor>, ServiceError> {
        let rows = review::Entity::find()
            .filter(review::Column::FoodCenterId.eq(food_center_id))
            .order_by_desc(review::Column::CreatedAt)
            .find_also_related(profile::Entity)
            .all(&*self.db_pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(review, author)| ReviewWithAuthor {
                review: review.into(),
                profiles: author.map(|p| ReviewAuthor {
                    full_name: p.full_name,
                }),
            })
            .collect())
    }

    #[instrument(skip(self, input), fields(food_center_id = %input.food_center_id))]
    pub async fn create(&self, input: CreateReviewRequest) -> Result<Review, ServiceError> {
        self.food_centers.ensure_exists(input.food_center_id).await?;

        let model = review::ActiveModel {
            id: Set(Uuid::new_v4()),
            food_center_id: Set(input.food_center_id),
            user_id: Set(input.user_id),
            rating: Set(input.rating),
            comment: Set(input.comment),
            helpful_count: Set(0),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(review_id = %model.id, rating = model.rating, "review created");
        Ok(model.into())
    }

    /// Increments the helpful counter of a review.
    #[instrument(skip(self))]
    pub async fn mark_helpful(&self, id: Uuid) -> Result<Review, ServiceError> {
        let result = review::Entity::update_many()
            .col_expr(
                review::Column::HelpfulCount,
                Expr::col(review::Column::HelpfulCount).add(1),
            )
            .filter(review::Column::Id.eq(id))
            .exec(&*self.db_pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Review not found"));
        }

        review::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .map(Review::from)
            .ok_or_else(|| ServiceError::not_found("Review not found"))
    }
}

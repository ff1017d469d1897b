use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    db::DbPool,
    entities::profile,
    errors::ServiceError,
    models::{Profile, UpdateProfileRequest, UserRole, DEFAULT_LANGUAGE},
};

#[derive(Clone)]
pub struct ProfileService {
    db_pool: Arc<DbPool>,
}

impl ProfileService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Profile, ServiceError> {
        self.find(id)
            .await?
            .map(Profile::from)
            .ok_or_else(|| ServiceError::not_found("Profile not found"))
    }

    async fn find(&self, id: Uuid) -> Result<Option<profile::Model>, ServiceError> {
        Ok(profile::Entity::find_by_id(id).one(&*self.db_pool).await?)
    }

    /// Inserts a default profile unless one already exists.
    ///
    /// Concurrent first requests of the same user both land on the row the
    /// winner inserted; the loser's insert is a no-op.
    pub(crate) async fn insert_default<C: ConnectionTrait>(
        db: &C,
        user: &AuthUser,
    ) -> Result<bool, ServiceError> {
        let now = Utc::now();
        let row = profile::ActiveModel {
            id: Set(user.user_id),
            email: Set(user.email.clone().unwrap_or_default()),
            full_name: Set(None),
            avatar_url: Set(None),
            role: Set(UserRole::User),
            preferred_language: Set(DEFAULT_LANGUAGE.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = profile::Entity::insert(row)
            .on_conflict(
                OnConflict::column(profile::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        Ok(inserted > 0)
    }

    async fn find_or_create(&self, user: &AuthUser) -> Result<profile::Model, ServiceError> {
        if let Some(existing) = self.find(user.user_id).await? {
            return Ok(existing);
        }

        if Self::insert_default(&*self.db_pool, user).await? {
            info!(user_id = %user.user_id, "profile created");
        }

        self.find(user.user_id)
            .await?
            .ok_or_else(|| ServiceError::InternalError("profile vanished after insert".into()))
    }

    /// The caller's profile, created on first access.
    #[instrument(skip(self, user), fields(user_id = %user.user_id))]
    pub async fn me(&self, user: &AuthUser) -> Result<Profile, ServiceError> {
        self.find_or_create(user).await.map(Profile::from)
    }

    /// Updates the caller's own profile. The role is never changed here.
    #[instrument(skip(self, user, input), fields(user_id = %user.user_id))]
    pub async fn upsert(
        &self,
        user: &AuthUser,
        input: UpdateProfileRequest,
    ) -> Result<Profile, ServiceError> {
        let mut active = self.find_or_create(user).await?.into_active_model();

        if let Some(full_name) = input.full_name {
            active.full_name = Set(Some(full_name));
        }
        if let Some(avatar_url) = input.avatar_url {
            active.avatar_url = Set(Some(avatar_url));
        }
        if let Some(language) = input.preferred_language {
            active.preferred_language = Set(language);
        }
        if let Some(email) = &user.email {
            active.email = Set(email.clone());
        }

        let model = active.update(&*self.db_pool).await?;
        Ok(model.into())
    }
}

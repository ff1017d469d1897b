use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{UserRole, LANGUAGES};
use crate::entities::profile;

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    #[schema(example = "en")]
    pub preferred_language: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<profile::Model> for Profile {
    fn from(model: profile::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            full_name: model.full_name,
            avatar_url: model.avatar_url,
            role: model.role,
            preferred_language: model.preferred_language,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub fn validate_language(code: &str) -> Result<(), ValidationError> {
    if LANGUAGES.iter().any(|(c, _)| *c == code) {
        Ok(())
    } else {
        let mut err = ValidationError::new("language");
        err.message = Some(format!("unsupported language '{}'", code).into());
        Err(err)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"full_name": "Ayşe Demir", "preferred_language": "tr"}))]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
    #[validate(custom = "validate_language")]
    pub preferred_language: Option<String>,
}

//! Verification of bearer tokens issued by the managed auth provider.

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    db::DbPool,
    entities::profile,
    errors::ServiceError,
    models::UserRole,
};

/// Claims of an access token. Only the fields used here are decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub email: Option<String>,
}

/// The caller behind a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
    /// Application role from the caller's profile; `user` without one.
    pub role: UserRole,
}

impl AuthUser {
    pub fn can_moderate(&self) -> bool {
        self.role.can_moderate()
    }

    pub fn require_moderator(&self) -> Result<(), ServiceError> {
        if self.can_moderate() {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions.into())
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No authentication token provided")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Authentication is not configured")]
    NotConfigured,

    #[error("Moderator role required")]
    InsufficientPermissions,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InsufficientPermissions => ServiceError::Forbidden(err.to_string()),
            AuthError::DatabaseError(e) => ServiceError::DatabaseError(e),
            other => ServiceError::Unauthorized(other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ServiceError::from(self).into_response()
    }
}

/// Verifies tokens and resolves the caller's role.
pub struct AuthService {
    decoding_key: Option<DecodingKey>,
    validation: Validation,
    db: Arc<DbPool>,
}

impl AuthService {
    pub fn new(config: &AppConfig, db: Arc<DbPool>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[config.jwt_audience.as_str()]);
        Self {
            decoding_key: config
                .jwt_secret
                .as_deref()
                .map(|secret| DecodingKey::from_secret(secret.as_bytes())),
            validation,
            db,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let key = self.decoding_key.as_ref().ok_or(AuthError::NotConfigured)?;
        let data = decode::<Claims>(token, key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => {
                debug!("token rejected: {}", e);
                AuthError::InvalidToken
            }
        })?;
        Ok(data.claims)
    }

    /// Resolves the caller from request headers; `Ok(None)` when no token is sent.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<Option<AuthUser>, AuthError> {
        let Some(token) = bearer_token(headers)? else {
            return Ok(None);
        };

        let claims = self.validate_token(token)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

        let role = profile::Entity::find_by_id(user_id)
            .one(&*self.db)
            .await?
            .map(|p| p.role)
            .unwrap_or_default();

        Ok(Some(AuthUser {
            user_id,
            email: claims.email,
            role,
        }))
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| AuthError::InvalidToken)?;
    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(Some(token.trim()))
        }
        _ => {
            warn!("malformed Authorization header");
            Err(AuthError::InvalidToken)
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AuthService>: FromRef<S>,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = Arc::<AuthService>::from_ref(state);
        auth.authenticate(&parts.headers)
            .await?
            .ok_or_else(|| AuthError::MissingToken.into())
    }
}

/// Caller identity for endpoints that also accept anonymous requests.
///
/// A token that is present but invalid is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AuthService>: FromRef<S>,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = Arc::<AuthService>::from_ref(state);
        Ok(MaybeAuthUser(auth.authenticate(&parts.headers).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use sea_orm::{ActiveModelTrait, Set};

    const SECRET: &str = "unit-test-secret-that-is-long-enough-0123456789";

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        aud: &'a str,
        exp: i64,
        email: &'a str,
    }

    fn token(sub: &str, aud: &str, exp_offset: i64) -> String {
        let claims = TestClaims {
            sub,
            aud,
            exp: chrono::Utc::now().timestamp() + exp_offset,
            email: "volunteer@example.org",
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    async fn service(secret: Option<&str>) -> AuthService {
        let db = crate::db::establish_connection_with_config(&crate::db::DbConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            ..Default::default()
        })
        .await
        .unwrap();
        crate::db::run_migrations(&db).await.unwrap();

        let mut config = AppConfig::new(
            "sqlite::memory:".into(),
            "127.0.0.1".into(),
            0,
            "development".into(),
        );
        config.jwt_secret = secret.map(str::to_string);
        AuthService::new(&config, Arc::new(db))
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[tokio::test]
    async fn no_header_is_anonymous() {
        let auth = service(Some(SECRET)).await;
        assert_eq!(auth.authenticate(&HeaderMap::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn valid_token_without_profile_is_plain_user() {
        let auth = service(Some(SECRET)).await;
        let id = Uuid::new_v4();
        let user = auth
            .authenticate(&headers(&format!("Bearer {}", token(&id.to_string(), "authenticated", 600))))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.user_id, id);
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.email.as_deref(), Some("volunteer@example.org"));
        assert!(user.require_moderator().is_err());
    }

    #[tokio::test]
    async fn role_comes_from_profile() {
        let auth = service(Some(SECRET)).await;
        let id = Uuid::new_v4();
        profile::ActiveModel {
            id: Set(id),
            email: Set("mod@example.org".into()),
            full_name: Set(None),
            avatar_url: Set(None),
            role: Set(UserRole::Moderator),
            preferred_language: Set("de".into()),
            ..Default::default()
        }
        .insert(&*auth.db)
        .await
        .unwrap();

        let user = auth
            .authenticate(&headers(&format!("bearer {}", token(&id.to_string(), "authenticated", 600))))
            .await
            .unwrap()
            .unwrap();
        assert!(user.require_moderator().is_ok());
    }

    #[tokio::test]
    async fn rejects_bad_tokens() {
        let auth = service(Some(SECRET)).await;
        let id = Uuid::new_v4().to_string();

        let expired = auth.validate_token(&token(&id, "authenticated", -3600));
        assert_matches!(expired, Err(AuthError::TokenExpired));

        let wrong_aud = auth.validate_token(&token(&id, "service_role", 600));
        assert_matches!(wrong_aud, Err(AuthError::InvalidToken));

        let not_uuid = auth
            .authenticate(&headers(&format!("Bearer {}", token("anon", "authenticated", 600))))
            .await;
        assert_matches!(not_uuid, Err(AuthError::InvalidToken));

        let basic = auth.authenticate(&headers("Basic dXNlcjpwdw==")).await;
        assert_matches!(basic, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn tokens_rejected_without_secret() {
        let auth = service(None).await;
        let result = auth.validate_token(&token(&Uuid::new_v4().to_string(), "authenticated", 600));
        assert_matches!(result, Err(AuthError::NotConfigured));
    }

    #[test]
    fn errors_map_to_status() {
        use axum::http::StatusCode;
        assert_eq!(
            ServiceError::from(AuthError::InsufficientPermissions).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServiceError::from(AuthError::TokenExpired).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}

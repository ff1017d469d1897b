use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::ServiceError;

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Parses a path segment as a UUID, reporting it as a field error.
pub fn parse_id(raw: &str, field: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw)
        .map_err(|_| ServiceError::invalid_field(field, "uuid", "must be a valid UUID"))
}

/// Wall-clock time used for opening hours: `at` (or now) shifted by the configured offset.
///
/// Instants whose shifted time leaves chrono's range are rejected as an `at` field error.
pub fn local_time(
    at: Option<DateTime<Utc>>,
    utc_offset_minutes: i32,
) -> Result<NaiveDateTime, ServiceError> {
    at.unwrap_or_else(Utc::now)
        .naive_utc()
        .checked_add_signed(Duration::minutes(i64::from(utc_offset_minutes)))
        .ok_or_else(|| ServiceError::invalid_field("at", "range", "instant is out of range"))
}

/// JSON body that has been deserialized and validated.
///
/// Malformed JSON and failed validation both surface as 400 with field errors.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ServiceError::invalid_field("body", "json", rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query string extractor whose failures use the JSON error body.
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ServiceError::invalid_field("query", "parse", rejection.body_text())
            })?;
        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_id_rejects_garbage() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "id").unwrap(), id);

        let ServiceError::ValidationError(fields) = parse_id("not-a-uuid", "food_center_id")
            .unwrap_err()
        else {
            panic!("expected validation error");
        };
        assert_eq!(fields[0].field, "food_center_id");
        assert_eq!(fields[0].code, "uuid");
    }

    #[test]
    fn local_time_applies_offset() {
        let at = Utc.with_ymd_and_hms(2024, 6, 3, 23, 30, 0).unwrap();
        let local = local_time(Some(at), 120).unwrap();
        assert_eq!(local.to_string(), "2024-06-04 01:30:00");
        assert_eq!(local_time(Some(at), 0).unwrap(), at.naive_utc());
    }

    #[test]
    fn local_time_rejects_overflowing_instants() {
        let last = DateTime::<Utc>::MAX_UTC;
        let ServiceError::ValidationError(fields) = local_time(Some(last), 60).unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(fields[0].field, "at");
        assert_eq!(fields[0].code, "range");

        let first = DateTime::<Utc>::MIN_UTC;
        assert!(local_time(Some(first), -60).is_err());
        assert_eq!(local_time(Some(last), 0).unwrap(), last.naive_utc());
    }
}

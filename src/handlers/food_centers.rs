use axum::{
    extract::{Path, State},
    response::{Json, Response},
    routing::get,
    Router,
};
use tracing::debug;
use validator::Validate;

use super::common::{created_response, local_time, parse_id, ValidatedJson, ValidatedQuery};
use crate::{
    auth::MaybeAuthUser,
    errors::ServiceError,
    geo::Coordinates,
    models::{
        CreateFoodCenterRequest, DietaryRestriction, FoodCenter, FoodCenterFilter,
        FoodCenterListQuery, FoodCenterType, NearbyQuery, UpdateFoodCenterRequest,
    },
    ranking::{rank, sort_by_distance, RankedFoodCenter},
    ApiResult, AppState,
};

pub fn food_center_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_food_centers).post(create_food_center))
        .route("/nearby", get(nearby_food_centers))
        .route("/:id", get(get_food_center).put(update_food_center))
}

/// Checks a search origin, including values `range` lets through such as NaN.
pub(crate) fn search_origin(lat: f64, lng: f64) -> Result<Coordinates, ServiceError> {
    let origin = Coordinates::new(lat, lng);
    origin.validate()?;
    if !origin.is_valid() {
        return Err(ServiceError::invalid_field(
            "lat",
            "range",
            "coordinates must be finite numbers",
        ));
    }
    Ok(origin)
}

fn parse_list_query(
    query: FoodCenterListQuery,
) -> Result<(FoodCenterFilter, Option<Coordinates>), ServiceError> {
    let r#type = match query.r#type.as_deref().filter(|t| !t.is_empty()) {
        Some(raw) => Some(FoodCenterType::parse(raw).ok_or_else(|| {
            ServiceError::invalid_field("type", "enum", format!("unknown food center type '{}'", raw))
        })?),
        None => None,
    };

    let dietary_restrictions = query
        .dietary_restrictions
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|raw| {
            DietaryRestriction::parse(raw).ok_or_else(|| {
                ServiceError::invalid_field(
                    "dietary_restrictions",
                    "enum",
                    format!("unknown dietary restriction '{}'", raw),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let origin = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => Some(search_origin(lat, lng)?),
        (None, None) => None,
        _ => {
            return Err(ServiceError::invalid_field(
                if query.lat.is_none() { "lat" } else { "lng" },
                "required",
                "lat and lng must be given together",
            ))
        }
    };

    let filter = FoodCenterFilter {
        r#type,
        city: query.city.filter(|c| !c.is_empty()),
        verified: query.verified,
        dietary_restrictions,
    };
    Ok((filter, origin))
}

#[utoipa::path(
    get,
    path = "/api/food-centers",
    params(FoodCenterListQuery),
    responses(
        (status = 200, description = "Food centers listed", body = Vec<FoodCenter>),
        (status = 400, description = "Invalid filter", body = crate::errors::ErrorResponse)
    ),
    tag = "food-centers"
)]
pub async fn list_food_centers(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<FoodCenterListQuery>,
) -> ApiResult<Vec<FoodCenter>> {
    let (filter, origin) = parse_list_query(query)?;
    let mut centers = state.services.food_centers.list(&filter).await?;
    sort_by_distance(&mut centers, origin);
    Ok(Json(centers))
}

#[utoipa::path(
    get,
    path = "/api/food-centers/nearby",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Centers within the radius", body = Vec<RankedFoodCenter>),
        (status = 400, description = "Invalid position or radius", body = crate::errors::ErrorResponse)
    ),
    tag = "food-centers"
)]
pub async fn nearby_food_centers(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<NearbyQuery>,
) -> ApiResult<Vec<RankedFoodCenter>> {
    let origin = search_origin(query.lat, query.lng)?;
    let at = local_time(query.at, state.config.hours_utc_offset_minutes)?;

    let radius = query
        .radius_meters
        .unwrap_or(state.config.default_search_radius_m);
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ServiceError::invalid_field(
            "radius_meters",
            "range",
            "must be a positive number of meters",
        ));
    }
    let radius = radius.min(state.config.max_search_radius_m);
    debug!(radius_m = radius, "searching nearby food centers");

    let centers = state
        .services
        .food_centers
        .nearby(origin, radius)
        .await?
        .into_iter()
        .map(|found| found.center)
        .collect();

    Ok(Json(rank(centers, origin, at, query.sort.unwrap_or_default())))
}

#[utoipa::path(
    get,
    path = "/api/food-centers/{id}",
    params(
        ("id" = Uuid, Path, description = "Food center ID")
    ),
    responses(
        (status = 200, description = "Food center fetched", body = FoodCenter),
        (status = 404, description = "Food center not found", body = crate::errors::ErrorResponse)
    ),
    tag = "food-centers"
)]
pub async fn get_food_center(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<FoodCenter> {
    let id = parse_id(&id, "id")?;
    Ok(Json(state.services.food_centers.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/food-centers",
    request_body = CreateFoodCenterRequest,
    responses(
        (status = 201, description = "Food center created", body = FoodCenter),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 401, description = "Invalid token", body = crate::errors::ErrorResponse)
    ),
    tag = "food-centers"
)]
pub async fn create_food_center(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    ValidatedJson(payload): ValidatedJson<CreateFoodCenterRequest>,
) -> Result<Response, ServiceError> {
    let created = state
        .services
        .food_centers
        .create(payload, caller.map(|c| c.user_id))
        .await?;
    Ok(created_response(created))
}

#[utoipa::path(
    put,
    path = "/api/food-centers/{id}",
    request_body = UpdateFoodCenterRequest,
    params(
        ("id" = Uuid, Path, description = "Food center ID")
    ),
    responses(
        (status = 200, description = "Food center updated", body = FoodCenter),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Food center not found", body = crate::errors::ErrorResponse)
    ),
    tag = "food-centers"
)]
pub async fn update_food_center(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateFoodCenterRequest>,
) -> ApiResult<FoodCenter> {
    let id = parse_id(&id, "id")?;
    Ok(Json(state.services.food_centers.update(id, payload).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> FoodCenterListQuery {
        FoodCenterListQuery::default()
    }

    #[test]
    fn empty_query_means_no_filters() {
        let (filter, origin) = parse_list_query(query()).unwrap();
        assert_eq!(filter, FoodCenterFilter::default());
        assert!(origin.is_none());
    }

    #[test]
    fn parses_type_and_restriction_list() {
        let (filter, _) = parse_list_query(FoodCenterListQuery {
            r#type: Some("soup_kitchen".into()),
            dietary_restrictions: Some("vegan, halal,,".into()),
            ..query()
        })
        .unwrap();
        assert_eq!(filter.r#type, Some(FoodCenterType::SoupKitchen));
        assert_eq!(
            filter.dietary_restrictions,
            vec![DietaryRestriction::Vegan, DietaryRestriction::Halal]
        );
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(parse_list_query(FoodCenterListQuery {
            r#type: Some("restaurant".into()),
            ..query()
        })
        .is_err());
        assert!(parse_list_query(FoodCenterListQuery {
            dietary_restrictions: Some("paleo".into()),
            ..query()
        })
        .is_err());
    }

    #[test]
    fn origin_needs_both_coordinates() {
        let err = parse_list_query(FoodCenterListQuery {
            lat: Some(52.5),
            ..query()
        })
        .unwrap_err();
        let ServiceError::ValidationError(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields[0].field, "lng");

        let (_, origin) = parse_list_query(FoodCenterListQuery {
            lat: Some(52.5),
            lng: Some(13.4),
            ..query()
        })
        .unwrap();
        assert_eq!(origin, Some(Coordinates::new(52.5, 13.4)));
    }

    #[test]
    fn search_origin_rejects_out_of_range_and_nan() {
        assert!(search_origin(91.0, 0.0).is_err());
        assert!(search_origin(f64::NAN, 0.0).is_err());
        assert!(search_origin(-33.9, 151.2).is_ok());
    }
}

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Meal Map API",
        version = "0.1.0",
        description = r#"
# Meal Map API

Crowdsourced map of food banks, community kitchens, soup kitchens, mobile units and pantries.

## Features

- **Food centers**: list, filter, create and update distribution points
- **Nearby search**: radius search ranked by distance, opening hours and stock level
- **Availability**: crowd-reported stock updates per center
- **Reviews**: ratings with helpful votes
- **Reports**: user reports with moderation
- **Geocoding**: display address for a map position

## Authentication

Most endpoints accept anonymous requests. Profiles and moderation require a bearer token
issued by the auth provider:

```
Authorization: Bearer <access-token>
```

## Error Handling

Errors share one body format:

```json
{
  "error": "Bad Request",
  "message": "Validation failed",
  "fields": [{"field": "location.lat", "code": "range", "message": "is out of range"}],
  "request_id": "5f0c6a8e-3b1d-4d2a-9e7f-1a2b3c4d5e6f",
  "timestamp": "2024-06-03T12:15:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development")
    ),
    tags(
        (name = "food-centers", description = "Food center endpoints"),
        (name = "availability", description = "Availability update endpoints"),
        (name = "reviews", description = "Review endpoints"),
        (name = "reports", description = "User report and moderation endpoints"),
        (name = "profiles", description = "User profile endpoints"),
        (name = "geocoding", description = "Reverse geocoding"),
        (name = "meta", description = "Option lists and map defaults"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        crate::handlers::food_centers::list_food_centers,
        crate::handlers::food_centers::nearby_food_centers,
        crate::handlers::food_centers::get_food_center,
        crate::handlers::food_centers::create_food_center,
        crate::handlers::food_centers::update_food_center,

        crate::handlers::availability::list_availability_updates,
        crate::handlers::availability::create_availability_update,

        crate::handlers::reviews::list_reviews,
        crate::handlers::reviews::create_review,
        crate::handlers::reviews::mark_review_helpful,

        crate::handlers::reports::create_report,
        crate::handlers::reports::list_reports,
        crate::handlers::reports::moderate_report,

        crate::handlers::profiles::get_my_profile,
        crate::handlers::profiles::update_my_profile,
        crate::handlers::profiles::get_profile,

        crate::handlers::geocoding::reverse_geocode,
        crate::handlers::meta::get_meta,

        crate::handlers::health::liveness_check,
        crate::handlers::health::readiness_check,
    ),
    components(
        schemas(
            crate::geo::Coordinates,
            crate::hours::DayHours,
            crate::hours::OpenStatus,
            crate::ranking::SortMode,
            crate::ranking::RankedFoodCenter,

            crate::models::FoodCenterType,
            crate::models::DietaryRestriction,
            crate::models::AvailabilityStatus,
            crate::models::ReportStatus,
            crate::models::UserRole,

            crate::models::FoodCenter,
            crate::models::CreateFoodCenterRequest,
            crate::models::UpdateFoodCenterRequest,
            crate::models::AvailabilityUpdate,
            crate::models::CreateAvailabilityRequest,
            crate::models::Review,
            crate::models::ReviewAuthor,
            crate::models::ReviewWithAuthor,
            crate::models::CreateReviewRequest,
            crate::models::UserReport,
            crate::models::CreateReportRequest,
            crate::models::ModerateReportRequest,
            crate::models::Profile,
            crate::models::UpdateProfileRequest,

            crate::services::DisplayAddress,
            crate::handlers::meta::OptionEntry,
            crate::handlers::meta::MetaResponse,
            crate::handlers::health::LivenessResponse,
            crate::handlers::health::ReadinessResponse,
            crate::handlers::health::ComponentHealth,
            crate::handlers::health::ComponentStatus,

            crate::errors::ErrorResponse,
            crate::errors::FieldError
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

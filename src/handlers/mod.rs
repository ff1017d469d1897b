pub mod availability;
pub mod common;
pub mod food_centers;
pub mod geocoding;
pub mod health;
pub mod meta;
pub mod profiles;
pub mod reports;
pub mod reviews;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::DbPool,
    errors::ServiceError,
    services::{
        AvailabilityService, FoodCenterService, GeocodingService, ProfileService, ReportService,
        ReviewService,
    },
};

pub use crate::AppState;

/// Services layer used by the HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub food_centers: Arc<FoodCenterService>,
    pub availability: Arc<AvailabilityService>,
    pub reviews: Arc<ReviewService>,
    pub reports: Arc<ReportService>,
    pub profiles: Arc<ProfileService>,
    pub geocoding: Arc<GeocodingService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, config: &AppConfig) -> Result<Self, ServiceError> {
        let food_centers = Arc::new(FoodCenterService::new(db_pool.clone()));
        let availability = Arc::new(AvailabilityService::new(
            db_pool.clone(),
            config.availability_history_limit,
        ));
        let reviews = Arc::new(ReviewService::new(db_pool.clone(), food_centers.clone()));
        let reports = Arc::new(ReportService::new(db_pool.clone(), food_centers.clone()));
        let profiles = Arc::new(ProfileService::new(db_pool));
        let geocoding = Arc::new(GeocodingService::new(config)?);

        Ok(Self {
            food_centers,
            availability,
            reviews,
            reports,
            profiles,
            geocoding,
        })
    }
}

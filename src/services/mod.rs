pub mod availability;
pub mod food_centers;
pub mod geocoding;
pub mod profiles;
pub mod reports;
pub mod reviews;

pub use availability::AvailabilityService;
pub use food_centers::{FoodCenterService, FOOD_CENTER_NOT_FOUND};
pub use geocoding::{DisplayAddress, GeocodingService};
pub use profiles::ProfileService;
pub use reports::ReportService;
pub use reviews::ReviewService;

pub mod availability_update;
pub mod food_center;
pub mod profile;
pub mod review;
pub mod user_report;

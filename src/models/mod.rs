pub mod availability;
pub mod food_center;
pub mod profile;
pub mod report;
pub mod review;

use sea_orm::entity::prelude::*;
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use availability::*;
pub use food_center::*;
pub use profile::*;
pub use report::*;
pub use review::*;

/// Kind of food distribution point.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FoodCenterType {
    #[sea_orm(string_value = "food_bank")]
    FoodBank,
    #[sea_orm(string_value = "community_kitchen")]
    CommunityKitchen,
    #[sea_orm(string_value = "soup_kitchen")]
    SoupKitchen,
    #[sea_orm(string_value = "mobile_unit")]
    MobileUnit,
    #[sea_orm(string_value = "pantry")]
    Pantry,
}

impl FoodCenterType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FoodBank => "Food Bank",
            Self::CommunityKitchen => "Community Kitchen",
            Self::SoupKitchen => "Soup Kitchen",
            Self::MobileUnit => "Mobile Unit",
            Self::Pantry => "Pantry",
        }
    }

    /// Parses the wire value used in query strings (`food_bank`, `pantry`, ...).
    pub fn parse(value: &str) -> Option<Self> {
        Self::iter().find(|t| t.to_string() == value)
    }
}

/// Dietary options a center can cater for.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    Halal,
    Kosher,
    GlutenFree,
    DairyFree,
    NutFree,
}

impl DietaryRestriction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::Halal => "Halal",
            Self::Kosher => "Kosher",
            Self::GlutenFree => "Gluten Free",
            Self::DairyFree => "Dairy Free",
            Self::NutFree => "Nut Free",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::iter().find(|r| r.to_string() == value)
    }
}

/// Crowd-reported stock level of a center.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AvailabilityStatus {
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "limited")]
    Limited,
    #[sea_orm(string_value = "unavailable")]
    Unavailable,
    #[default]
    #[sea_orm(string_value = "unknown")]
    Unknown,
}

impl AvailabilityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Limited => "Limited",
            Self::Unavailable => "Unavailable",
            Self::Unknown => "Unknown",
        }
    }

    /// Marker color shown on the map.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Available => "green",
            Self::Limited => "yellow",
            Self::Unavailable => "red",
            Self::Unknown => "gray",
        }
    }
}

/// Moderation state of a user report.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserRole {
    #[default]
    #[sea_orm(string_value = "user")]
    User,
    #[sea_orm(string_value = "moderator")]
    Moderator,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl UserRole {
    pub fn can_moderate(&self) -> bool {
        matches!(self, Self::Moderator | Self::Admin)
    }
}

/// Interface languages offered to users, `(code, label)`.
pub const LANGUAGES: [(&str, &str); 6] = [
    ("en", "English"),
    ("de", "Deutsch"),
    ("fr", "Français"),
    ("es", "Español"),
    ("ar", "العربية"),
    ("tr", "Türkçe"),
];

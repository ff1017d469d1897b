//! Proximity and open-status ranking of food centers.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::ToSchema;

use crate::geo::{format_distance, haversine_distance, Coordinates};
use crate::hours::{format_operating_hours, open_status, OpenStatus};
use crate::models::{AvailabilityStatus, FoodCenter};

const DISTANCE_WEIGHT: f64 = 0.6;
const OPEN_WEIGHT: f64 = 0.3;
const AVAILABILITY_WEIGHT: f64 = 0.1;

/// How a nearby search orders its results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Distance,
    Score,
}

/// A food center annotated with its distance and ranking score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RankedFoodCenter {
    #[serde(flatten)]
    pub center: FoodCenter,
    /// Meters from the search origin.
    pub distance_m: f64,
    #[schema(example = "850m")]
    pub distance_label: String,
    pub open_status: OpenStatus,
    /// Hours for the local weekday of the search, e.g. `"09:00 - 17:00"`.
    #[schema(example = "09:00 - 17:00")]
    pub hours_today: String,
    pub score: f64,
}

/// 1 at the origin, halves by one kilometer, tends to 0.
pub fn distance_score(meters: f64) -> f64 {
    1.0 / (1.0 + meters.max(0.0) / 1000.0)
}

pub fn open_score(status: OpenStatus) -> f64 {
    match status {
        OpenStatus::Open => 1.0,
        OpenStatus::Unknown => 0.5,
        OpenStatus::Closed => 0.0,
    }
}

pub fn availability_score(status: AvailabilityStatus) -> f64 {
    match status {
        AvailabilityStatus::Available => 1.0,
        AvailabilityStatus::Limited => 0.6,
        AvailabilityStatus::Unknown => 0.3,
        AvailabilityStatus::Unavailable => 0.0,
    }
}

pub fn score(distance_m: f64, open: OpenStatus, availability: AvailabilityStatus) -> f64 {
    DISTANCE_WEIGHT * distance_score(distance_m)
        + OPEN_WEIGHT * open_score(open)
        + AVAILABILITY_WEIGHT * availability_score(availability)
}

fn by_distance_then_name(a: &RankedFoodCenter, b: &RankedFoodCenter) -> Ordering {
    a.distance_m
        .total_cmp(&b.distance_m)
        .then_with(|| a.center.name.cmp(&b.center.name))
}

/// Orders centers by distance from `origin`, nearest first.
///
/// Without an origin the incoming order is preserved.
pub fn sort_by_distance(centers: &mut [FoodCenter], origin: Option<Coordinates>) {
    let Some(origin) = origin else {
        return;
    };
    centers.sort_by(|a, b| {
        haversine_distance(origin, a.location)
            .total_cmp(&haversine_distance(origin, b.location))
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Annotates `centers` relative to `origin` at local time `at` and orders them by `mode`.
pub fn rank(
    centers: Vec<FoodCenter>,
    origin: Coordinates,
    at: NaiveDateTime,
    mode: SortMode,
) -> Vec<RankedFoodCenter> {
    let mut ranked: Vec<RankedFoodCenter> = centers
        .into_iter()
        .map(|center| {
            let distance_m = haversine_distance(origin, center.location);
            let open_status = open_status(center.operating_hours.as_ref(), at);
            let score = score(distance_m, open_status, center.current_availability);
            RankedFoodCenter {
                distance_label: format_distance(distance_m),
                distance_m,
                open_status,
                hours_today: format_operating_hours(center.operating_hours.as_ref(), at.weekday()),
                score,
                center,
            }
        })
        .collect();

    match mode {
        SortMode::Distance => ranked.sort_by(by_distance_then_name),
        SortMode::Score => ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| by_distance_then_name(a, b))
        }),
    }
    ranked
}

//! Coordinates, great-circle distance and the PostGIS point text format.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree of latitude on the mean sphere.
const METERS_PER_DEGREE: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// Berlin city center, where the map opens when the user has no location.
pub const DEFAULT_MAP_CENTER: Coordinates = Coordinates {
    lat: 52.52,
    lng: 13.405,
};

static POINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*POINT\s*\(\s*([-+]?[0-9]*\.?[0-9]+)\s+([-+]?[0-9]*\.?[0-9]+)\s*\)\s*$")
        .expect("point pattern is valid")
});

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"lat": 52.5021, "lng": 13.395}))]
pub struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Great-circle distance between two points in meters (haversine formula).
pub fn haversine_distance(a: Coordinates, b: Coordinates) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_M * c
}

/// Parses the geography text form `POINT(lng lat)`.
pub fn parse_geography_point(point: &str) -> Option<Coordinates> {
    let caps = POINT_RE.captures(point)?;
    let lng = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let lat = caps.get(2)?.as_str().parse::<f64>().ok()?;
    let coords = Coordinates { lat, lng };
    coords.is_valid().then_some(coords)
}

/// Renders coordinates as `POINT(lng lat)`.
pub fn to_geography_point(coords: Coordinates) -> String {
    format!("POINT({} {})", coords.lng, coords.lat)
}

/// Human readable distance: whole meters below one kilometer, else km with one decimal.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters.round() as i64)
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}

/// Coarse rectangle used to pre-filter radius searches in the database.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    /// `None` when the box spans the antimeridian or a pole; callers then skip
    /// longitude filtering and rely on the exact distance check.
    pub lng_range: Option<(f64, f64)>,
}

impl BoundingBox {
    pub fn around(center: Coordinates, radius_m: f64) -> Self {
        let d_lat = radius_m / METERS_PER_DEGREE;
        let min_lat = center.lat - d_lat;
        let max_lat = center.lat + d_lat;

        let lng_range = if min_lat <= -90.0 || max_lat >= 90.0 {
            None
        } else {
            // Widest longitude span occurs at the latitude edge closest to a pole.
            let widest_lat = min_lat.abs().max(max_lat.abs()).to_radians();
            let d_lng = radius_m / (METERS_PER_DEGREE * widest_lat.cos());
            let (min_lng, max_lng) = (center.lng - d_lng, center.lng + d_lng);
            (min_lng >= -180.0 && max_lng <= 180.0).then_some((min_lng, max_lng))
        };

        Self {
            min_lat: min_lat.max(-90.0),
            max_lat: max_lat.min(90.0),
            lng_range,
        }
    }

    pub fn contains(&self, point: Coordinates) -> bool {
        let lat_ok = (self.min_lat..=self.max_lat).contains(&point.lat);
        let lng_ok = self
            .lng_range
            .map_or(true, |(min, max)| (min..=max).contains(&point.lng));
        lat_ok && lng_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRANDENBURG_GATE: Coordinates = Coordinates {
        lat: 52.5163,
        lng: 13.3777,
    };
    const ALEXANDERPLATZ: Coordinates = Coordinates {
        lat: 52.5219,
        lng: 13.4132,
    };

    #[test]
    fn distance_between_berlin_landmarks() {
        let d = haversine_distance(BRANDENBURG_GATE, ALEXANDERPLATZ);
        assert!((d - 2_476.0).abs() < 30.0, "got {d}");
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_distance(ALEXANDERPLATZ, ALEXANDERPLATZ), 0.0);
    }

    #[test]
    fn antipodal_distance_is_half_circumference() {
        let d = haversine_distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1.0);
    }

    #[test]
    fn parses_point_text() {
        let p = parse_geography_point("POINT(13.3950 52.5021)").unwrap();
        assert_eq!(p, Coordinates::new(52.5021, 13.395));
        assert_eq!(
            parse_geography_point(" POINT ( -0.1276 51.5072 ) "),
            Some(Coordinates::new(51.5072, -0.1276))
        );
    }

    #[test]
    fn rejects_malformed_points() {
        assert_eq!(parse_geography_point(""), None);
        assert_eq!(parse_geography_point("POINT(13.4)"), None);
        assert_eq!(parse_geography_point("LINESTRING(1 2, 3 4)"), None);
        assert_eq!(parse_geography_point("POINT(200 10)"), None);
    }

    #[test]
    fn point_text_round_trips() {
        let text = to_geography_point(BRANDENBURG_GATE);
        assert_eq!(text, "POINT(13.3777 52.5163)");
        assert_eq!(parse_geography_point(&text), Some(BRANDENBURG_GATE));
    }

    #[test]
    fn formats_distances() {
        assert_eq!(format_distance(0.0), "0m");
        assert_eq!(format_distance(849.6), "850m");
        assert_eq!(format_distance(999.4), "999m");
        assert_eq!(format_distance(1000.0), "1.0km");
        assert_eq!(format_distance(1_549.0), "1.5km");
        assert_eq!(format_distance(12_345.0), "12.3km");
    }

    #[test]
    fn bounding_box_contains_points_within_radius() {
        let bbox = BoundingBox::around(BRANDENBURG_GATE, 5_000.0);
        assert!(bbox.contains(ALEXANDERPLATZ));
        assert!(!bbox.contains(Coordinates::new(48.1351, 11.5820)));
    }

    #[test]
    fn bounding_box_drops_longitude_across_antimeridian() {
        let bbox = BoundingBox::around(Coordinates::new(0.0, 179.99), 10_000.0);
        assert_eq!(bbox.lng_range, None);
        assert!(bbox.contains(Coordinates::new(0.0, -179.99)));
    }

    #[test]
    fn bounding_box_drops_longitude_at_the_pole() {
        let origin = Coordinates::new(89.99, 0.0);
        let bbox = BoundingBox::around(origin, 5_000.0);
        assert_eq!(bbox.lng_range, None);
        assert_eq!(bbox.max_lat, 90.0);

        let across_the_pole = Coordinates::new(89.99, 180.0);
        assert!(haversine_distance(origin, across_the_pole) <= 5_000.0);
        assert!(bbox.contains(across_the_pole));
    }

    #[test]
    fn bounding_box_widens_longitude_near_the_pole() {
        let origin = Coordinates::new(80.0, 10.0);
        let bbox = BoundingBox::around(origin, 50_000.0);
        let (min_lng, max_lng) = bbox.lng_range.unwrap();
        // Roughly 0.45 degrees of latitude but several degrees of longitude.
        assert!(max_lng - min_lng > 4.0, "got {min_lng}..{max_lng}");

        let east = Coordinates::new(80.0, 12.4);
        assert!(haversine_distance(origin, east) <= 50_000.0);
        assert!(bbox.contains(east));
    }

    #[test]
    fn coordinates_validate_ranges() {
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -181.0).validate().is_err());
        assert!(Coordinates::new(-90.0, 180.0).validate().is_ok());
    }
}

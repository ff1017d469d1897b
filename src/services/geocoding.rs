//! Reverse geocoding through a Nominatim-compatible endpoint.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{instrument, warn};
use utoipa::ToSchema;

use crate::{config::AppConfig, errors::ServiceError, geo::Coordinates};

const FALLBACK_STREET: &str = "Current Location";
const UNKNOWN: &str = "Unknown";
const KNOWN_CITIES: [&str; 4] = ["Berlin", "Hamburg", "München", "Köln"];

/// Address lines suitable for display next to a map position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "address": "Oranienstraße 12A",
    "city": "Kreuzberg, 10999 Berlin",
    "country": "Deutschland"
}))]
pub struct DisplayAddress {
    pub address: String,
    pub city: String,
    pub country: String,
}

impl Default for DisplayAddress {
    fn default() -> Self {
        Self {
            address: FALLBACK_STREET.to_string(),
            city: UNKNOWN.to_string(),
            country: UNKNOWN.to_string(),
        }
    }
}

/// Structured address block of a Nominatim response.
#[derive(Debug, Default, Deserialize)]
pub struct NominatimAddress {
    pub road: Option<String>,
    pub house_number: Option<String>,
    pub suburb: Option<String>,
    pub district: Option<String>,
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NominatimResponse {
    pub address: Option<NominatimAddress>,
    pub display_name: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn join_city(district: Option<&str>, postcode: Option<&str>, city: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(district) = district {
        parts.push(district.to_string());
    }
    match (postcode, city) {
        (Some(postcode), Some(city)) => parts.push(format!("{} {}", postcode, city)),
        (Some(postcode), None) => parts.push(postcode.to_string()),
        (None, Some(city)) => parts.push(city.to_string()),
        (None, None) => {}
    }
    parts.join(", ")
}

fn from_structured(addr: &NominatimAddress) -> DisplayAddress {
    let street = match (present(&addr.road), present(&addr.house_number), present(&addr.suburb)) {
        (Some(road), Some(number), _) => format!("{} {}", road, number.to_uppercase()),
        (Some(road), None, _) => road.to_string(),
        (None, _, Some(suburb)) => suburb.to_string(),
        (None, _, None) => FALLBACK_STREET.to_string(),
    };

    let district = present(&addr.district)
        .or_else(|| present(&addr.suburb).filter(|suburb| *suburb != street));
    let city = present(&addr.city)
        .or_else(|| present(&addr.town))
        .or_else(|| present(&addr.village));

    DisplayAddress {
        city: join_city(district, present(&addr.postcode), city),
        country: present(&addr.country).unwrap_or(UNKNOWN).to_string(),
        address: street,
    }
}

fn is_postcode(part: &str) -> bool {
    part.len() == 5 && part.bytes().all(|b| b.is_ascii_digit())
}

fn from_display_name(display_name: &str) -> DisplayAddress {
    let parts: Vec<&str> = display_name.split(", ").collect();
    let middle = if parts.len() > 2 {
        &parts[1..parts.len() - 1]
    } else {
        &[][..]
    };

    let mut postcode = None;
    let mut city = None;
    let mut district = None;
    for &part in middle {
        if is_postcode(part) {
            postcode = Some(part);
        } else if KNOWN_CITIES.contains(&part) {
            city = Some(part);
        } else if part.chars().count() > 2 && postcode.is_none() && city.is_none() {
            district = Some(part);
        }
    }

    let first = parts.first().copied().filter(|s| !s.is_empty());
    let last = parts.last().copied().filter(|s| !s.is_empty());
    DisplayAddress {
        address: first.unwrap_or(FALLBACK_STREET).to_string(),
        city: join_city(district, postcode, city),
        country: last.unwrap_or(UNKNOWN).to_string(),
    }
}

/// Turns a reverse-geocoding response into display lines.
pub fn parse_address(response: &NominatimResponse) -> DisplayAddress {
    if let Some(addr) = &response.address {
        return from_structured(addr);
    }
    match present(&response.display_name) {
        Some(display_name) => from_display_name(display_name),
        None => DisplayAddress::default(),
    }
}

/// HTTP client for the reverse geocoder.
#[derive(Clone)]
pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodingService {
    pub fn new(config: &AppConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.geocoding_timeout_secs))
            .user_agent(config.nominatim_user_agent.clone())
            .build()
            .map_err(|e| ServiceError::InternalError(format!("geocoder client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.nominatim_base_url.trim_end_matches('/').to_string(),
        })
    }

    #[instrument(skip(self))]
    pub async fn reverse(&self, position: Coordinates) -> Result<DisplayAddress, ServiceError> {
        let url = format!("{}/reverse", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", position.lat.to_string()),
                ("lon", position.lng.to_string()),
                ("zoom", "18".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!("geocoder request failed: {}", e);
                ServiceError::ExternalServiceError(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "geocoder returned an error status");
            return Err(ServiceError::ExternalServiceError(format!(
                "geocoder responded with {}",
                status
            )));
        }

        let body: NominatimResponse = response.json().await.map_err(|e| {
            warn!("geocoder response could not be decoded: {}", e);
            ServiceError::ExternalServiceError(e.to_string())
        })?;

        Ok(parse_address(&body))
    }
}

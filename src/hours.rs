//! Weekly opening hours and open/closed evaluation.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::ValidationError;

/// Weekday keys in the order they are shown to users.
pub const WEEKDAY_KEYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Opening window for one day, both ends as `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"open": "09:00", "close": "17:00"}))]
pub struct DayHours {
    pub open: String,
    pub close: String,
}

impl DayHours {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    fn parsed(&self) -> Option<(NaiveTime, NaiveTime)> {
        Some((parse_clock(&self.open)?, parse_clock(&self.close)?))
    }
}

/// Weekday key (`mon`..`sun`) to opening window.
pub type OperatingHours = BTreeMap<String, DayHours>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OpenStatus {
    Open,
    Closed,
    /// The center publishes no hours at all.
    Unknown,
}

pub fn weekday_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

/// Parses `HH:MM` (24h clock).
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let (h, m) = value.trim().split_once(':')?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return None;
    }
    NaiveTime::from_hms_opt(h.parse().ok()?, m.parse().ok()?, 0)
}

/// Whether the center is open at `at` (local wall-clock time of the center).
///
/// A window whose close is at or before its open runs past midnight, so the
/// previous day's window is consulted for early-morning times.
pub fn open_status(hours: Option<&OperatingHours>, at: NaiveDateTime) -> OpenStatus {
    let hours = match hours {
        Some(h) if !h.is_empty() => h,
        _ => return OpenStatus::Unknown,
    };

    let now = at.time();
    let today = at.weekday();

    if let Some((open, close)) = hours.get(weekday_key(today)).and_then(DayHours::parsed) {
        let open_now = if close > open {
            now >= open && now < close
        } else {
            now >= open
        };
        if open_now {
            return OpenStatus::Open;
        }
    }

    let yesterday = today.pred();
    if let Some((open, close)) = hours.get(weekday_key(yesterday)).and_then(DayHours::parsed) {
        if close <= open && now < close {
            return OpenStatus::Open;
        }
    }

    OpenStatus::Closed
}

/// One-line summary of the hours for `day`.
pub fn format_operating_hours(hours: Option<&OperatingHours>, day: Weekday) -> String {
    let Some(hours) = hours else {
        return "Hours not specified".to_string();
    };
    match hours.get(weekday_key(day)) {
        Some(window) => format!("{} - {}", window.open, window.close),
        None => "Closed today".to_string(),
    }
}

/// Rejects unknown weekday keys and times that are not `HH:MM`.
pub fn validate_operating_hours(hours: &OperatingHours) -> Result<(), ValidationError> {
    for (day, window) in hours {
        if !WEEKDAY_KEYS.contains(&day.as_str()) {
            let mut err = ValidationError::new("weekday");
            err.message = Some(format!("unknown weekday '{}', expected one of mon..sun", day).into());
            return Err(err);
        }
        if window.parsed().is_none() {
            let mut err = ValidationError::new("time_format");
            err.message = Some(format!("hours for '{}' must use HH:MM", day).into());
            return Err(err);
        }
    }
    Ok(())
}
